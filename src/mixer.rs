/*
 * Tascam Controls - Mixer Adapter Module
 * Version: 1.0
 * Copyright (c) 2025 Tascam Controls contributors
 * Under MIT License
 * Feel free to share and modify
 *
 * Reads and writes named driver controls through the amixer CLI and the
 * card's sysfs attributes
 */

use std::path::PathBuf;
use std::process::Command;

const DEFAULT_AMIXER: &str = "amixer";
const DEFAULT_SYSFS_ROOT: &str = "/sys/class/sound";

/// Adapter around `amixer cget`/`cset` for one ALSA card.
///
/// The card index is captured once at startup and passed in explicitly;
/// the binary path and sysfs root are parameters so tests can point them
/// at stubs. All the fragile output scanning lives here.
pub struct MixerAdapter {
    card_index: u32,
    amixer_path: String,
    sysfs_root: PathBuf,
}

impl MixerAdapter {
    pub fn new(card_index: u32) -> Self {
        Self::with_paths(card_index, DEFAULT_AMIXER, DEFAULT_SYSFS_ROOT)
    }

    pub fn with_amixer(card_index: u32, amixer_path: impl Into<String>) -> Self {
        Self::with_paths(card_index, amixer_path, DEFAULT_SYSFS_ROOT)
    }

    pub fn with_paths(
        card_index: u32,
        amixer_path: impl Into<String>,
        sysfs_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            card_index,
            amixer_path: amixer_path.into(),
            sysfs_root: sysfs_root.into(),
        }
    }

    pub fn card_index(&self) -> u32 {
        self.card_index
    }

    /// Read a named integer control. Any failure (missing binary, bad exit
    /// status, output without a parsable "values=" field) reads as 0.
    pub fn read_int(&self, control_name: &str) -> i64 {
        match self.run_cget(control_name) {
            Some(output) => parse_values_int(&output).unwrap_or(0),
            None => 0,
        }
    }

    /// Read a named byte-string control: the comma-separated hex bytes
    /// after "values=" decode as text up to the first NUL. Command or
    /// decode failure reads as "Error"; output without a "values=" field
    /// reads as "N/A".
    pub fn read_string(&self, control_name: &str) -> String {
        let output = match self.run_cget(control_name) {
            Some(output) => output,
            None => return "Error".to_string(),
        };
        match values_field(&output) {
            Some(field) => decode_hex_values(field).unwrap_or_else(|| "Error".to_string()),
            None => "N/A".to_string(),
        }
    }

    /// Write a named integer control. True iff amixer ran and exited 0.
    pub fn write_int(&self, control_name: &str, value: i64) -> bool {
        Command::new(&self.amixer_path)
            .arg("-c")
            .arg(self.card_index.to_string())
            .arg("cset")
            .arg(format!("name='{}'", control_name))
            .arg(value.to_string())
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Read a plain-text attribute under the card's sysfs device node,
    /// trimmed. Missing or unreadable files read as "N/A".
    pub fn read_sysfs_attr(&self, attr_name: &str) -> String {
        let path = self
            .sysfs_root
            .join(format!("card{}", self.card_index))
            .join("device")
            .join(attr_name);
        match std::fs::read_to_string(&path) {
            Ok(contents) => contents.trim().to_string(),
            Err(_) => "N/A".to_string(),
        }
    }

    fn run_cget(&self, control_name: &str) -> Option<String> {
        let output = Command::new(&self.amixer_path)
            .arg("-c")
            .arg(self.card_index.to_string())
            .arg("cget")
            .arg(format!("name='{}'", control_name))
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Pull the text after "values=" from the one line of cget output that
/// carries it, e.g. "  : values=5" -> "5".
fn values_field(output: &str) -> Option<&str> {
    output
        .lines()
        .find(|line| line.contains(": values="))
        .and_then(|line| line.splitn(2, '=').nth(1))
}

fn parse_values_int(output: &str) -> Option<i64> {
    values_field(output).and_then(|field| field.trim().parse::<i64>().ok())
}

/// Decode "55,53,..." hex bytes as a NUL-terminated UTF-8 string.
fn decode_hex_values(field: &str) -> Option<String> {
    let mut bytes = Vec::new();
    for token in field.trim().split(',') {
        bytes.push(u8::from_str_radix(token.trim(), 16).ok()?);
    }
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    Some(String::from_utf8_lossy(&bytes[..end]).trim().to_string())
}
