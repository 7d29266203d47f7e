/*
 * Tascam Controls - Configuration Module
 * Version: 1.0
 * Copyright (c) 2025 Tascam Controls contributors
 * Under MIT License
 * Feel free to share and modify
 *
 * Optional TOML overrides for the card name and external tool paths
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::card::DEFAULT_CARD_NAME;

/// Settings read from ~/.config/tascam-controls/config.toml. Everything is
/// optional; the file itself is optional. Nothing is ever written back.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Substring to look for in the card enumeration (driver card name).
    pub card_name: String,
    /// Path to the amixer binary.
    pub amixer_path: String,
    /// Path to the aplay binary used for card enumeration.
    pub aplay_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            card_name: DEFAULT_CARD_NAME.to_string(),
            amixer_path: "amixer".to_string(),
            aplay_path: "aplay".to_string(),
        }
    }
}

impl AppConfig {
    /// Best-effort load: defaults when the file is absent, defaults plus a
    /// console note when it is unreadable or malformed.
    pub fn load() -> Self {
        let path = match config_path() {
            Some(path) => path,
            None => return Self::default(),
        };
        if !path.exists() {
            return Self::default();
        }
        match load_from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Ignoring config file {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.card_name.is_empty() {
            return Err("card_name cannot be empty".to_string());
        }
        if self.amixer_path.is_empty() || self.aplay_path.is_empty() {
            return Err("tool paths cannot be empty".to_string());
        }
        Ok(())
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tascam-controls").join("config.toml"))
}

fn load_from_path(path: &std::path::Path) -> Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&text)
}

fn parse_config(text: &str) -> Result<AppConfig> {
    let mut config: AppConfig = toml::from_str(text).context("invalid TOML")?;
    config.validate().map_err(anyhow::Error::msg)?;

    // Tool paths may use ~; the card name is a literal substring.
    config.amixer_path = shellexpand::tilde(&config.amixer_path).into_owned();
    config.aplay_path = shellexpand::tilde(&config.aplay_path).into_owned();
    Ok(config)
}
