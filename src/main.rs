/*
 * Tascam Controls
 * Version: 1.0
 * Copyright (c) 2025 Tascam Controls contributors
 * Under MIT License
 * Feel free to share and modify
 *
 * Control panel for the TASCAM US-144MKII USB audio interface on Linux
 */

use gtk::Application;
use gtk::prelude::*;
use tascam_controls::{AppConfig, ControlPanel, MixerAdapter, locate_card, ui};

fn main() {
    let app = Application::new(Some("com.serifpersia.tascam-controls"), Default::default());

    app.connect_activate(|app| {
        let config = AppConfig::load();

        match locate_card(&config.card_name, &config.aplay_path) {
            Some(card_index) => {
                let adapter = MixerAdapter::with_amixer(card_index, &config.amixer_path);
                let panel = ControlPanel::new(app, adapter);
                panel.window.show_all();
            }
            None => {
                ui::show_device_not_found_dialog();
                std::process::exit(1);
            }
        }
    });

    app.run();
}
