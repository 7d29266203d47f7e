/*
 * Tascam Controls Library
 * Version: 1.0
 * Copyright (c) 2025 Tascam Controls contributors
 * Under MIT License
 * Feel free to share and modify
 */

pub mod card;
pub mod config;
pub mod mixer;
pub mod ui;

// Re-export main functionality
pub use card::{DEFAULT_CARD_NAME, locate_card, parse_card_listing};
pub use config::AppConfig;
pub use mixer::MixerAdapter;
pub use ui::{ControlPanel, show_about_dialog, show_device_not_found_dialog};
