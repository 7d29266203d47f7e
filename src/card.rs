/*
 * Tascam Controls - Device Locator Module
 * Version: 1.0
 * Copyright (c) 2025 Tascam Controls contributors
 * Under MIT License
 * Feel free to share and modify
 *
 * Locates the US-144MKII's ALSA card number at startup
 */

use std::path::Path;
use std::process::Command;

use lazy_static::lazy_static;
use regex::Regex;

/// Card name the us144mkii driver registers with ALSA.
pub const DEFAULT_CARD_NAME: &str = "US144MKII";

const SYSFS_SOUND_DIR: &str = "/sys/class/sound";

lazy_static! {
    static ref CARD_LINE_RE: Regex = Regex::new(r"^card (\d+):").unwrap();
}

/// Find the ALSA card number for the named device.
///
/// Tries `aplay -l` first and falls back to scanning
/// /sys/class/sound/card*/id when the tool is missing or finds nothing.
/// Every failure collapses to None; callers treat that as device-not-found.
pub fn locate_card(card_name: &str, aplay_path: &str) -> Option<u32> {
    locate_via_aplay(card_name, aplay_path).or_else(|| locate_via_sysfs(card_name))
}

fn locate_via_aplay(card_name: &str, aplay_path: &str) -> Option<u32> {
    let output = Command::new(aplay_path).args(["-l"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let output_str = String::from_utf8_lossy(&output.stdout);
    parse_card_listing(&output_str, card_name)
}

/// Scan line-oriented `aplay -l` output for the first card whose line
/// mentions the device name, and pull the card number out of the
/// "card <N>:" prefix.
pub fn parse_card_listing(output: &str, card_name: &str) -> Option<u32> {
    output
        .lines()
        .filter(|line| line.contains(card_name))
        .find_map(|line| {
            CARD_LINE_RE
                .captures(line)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u32>().ok())
        })
}

fn locate_via_sysfs(card_name: &str) -> Option<u32> {
    scan_sysfs_cards(Path::new(SYSFS_SOUND_DIR), card_name)
}

/// Walk <root>/card*/id and return the number of the first card whose id
/// file mentions the device name.
fn scan_sysfs_cards(root: &Path, card_name: &str) -> Option<u32> {
    let pattern = format!("{}/card*", root.display());
    let entries = glob::glob(&pattern).ok()?;

    for entry in entries.flatten() {
        let card_num = match card_number_from_path(&entry) {
            Some(num) => num,
            None => continue,
        };
        if let Ok(id) = std::fs::read_to_string(entry.join("id")) {
            if id.contains(card_name) {
                return Some(card_num);
            }
        }
    }
    None
}

fn card_number_from_path(path: &Path) -> Option<u32> {
    path.file_name()?
        .to_str()?
        .strip_prefix("card")?
        .parse::<u32>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const APLAY_LISTING: &str = "\
**** List of PLAYBACK Hardware Devices ****
card 0: PCH [HDA Intel PCH], device 0: ALC892 Analog [ALC892 Analog]
  Subdevices: 1/1
  Subdevice #0: subdevice #0
card 2: US144MKII [TASCAM US-144MKII], device 0: US-144MKII PCM [US-144MKII PCM]
  Subdevices: 1/1
  Subdevice #0: subdevice #0
";

    #[test]
    fn test_parse_card_listing_finds_card() {
        assert_eq!(parse_card_listing(APLAY_LISTING, "US144MKII"), Some(2));
    }

    #[test]
    fn test_parse_card_listing_no_match() {
        assert_eq!(parse_card_listing(APLAY_LISTING, "US122MKII"), None);
    }

    #[test]
    fn test_parse_card_listing_first_match_wins() {
        let listing = "\
card 1: US144MKII [TASCAM US-144MKII], device 0: US-144MKII PCM
card 3: US144MKII [TASCAM US-144MKII], device 0: US-144MKII PCM
";
        assert_eq!(parse_card_listing(listing, "US144MKII"), Some(1));
    }

    #[test]
    fn test_parse_card_listing_ignores_indented_mentions() {
        // Only "card <N>:" lines carry a card number; a mention on a
        // subdevice line must not produce a match.
        let listing = "  Subdevice #0: US144MKII something\n";
        assert_eq!(parse_card_listing(listing, "US144MKII"), None);
    }

    #[test]
    fn test_parse_card_listing_empty_output() {
        assert_eq!(parse_card_listing("", "US144MKII"), None);
    }

    #[test]
    fn test_card_number_from_path() {
        assert_eq!(card_number_from_path(Path::new("/sys/class/sound/card2")), Some(2));
        assert_eq!(card_number_from_path(Path::new("/sys/class/sound/timer")), None);
        assert_eq!(card_number_from_path(Path::new("/sys/class/sound/cardX")), None);
    }

    #[test]
    fn test_scan_sysfs_cards() {
        let dir = tempfile::tempdir().unwrap();
        let card0 = dir.path().join("card0");
        let card2 = dir.path().join("card2");
        std::fs::create_dir_all(&card0).unwrap();
        std::fs::create_dir_all(&card2).unwrap();
        std::fs::write(card0.join("id"), "PCH\n").unwrap();
        std::fs::write(card2.join("id"), "US144MKII\n").unwrap();

        assert_eq!(scan_sysfs_cards(dir.path(), "US144MKII"), Some(2));
        assert_eq!(scan_sysfs_cards(dir.path(), "US122MKII"), None);
    }

    #[test]
    fn test_scan_sysfs_cards_missing_root() {
        let missing = Path::new("/nonexistent/sysfs/root");
        assert_eq!(scan_sysfs_cards(missing, "US144MKII"), None);
    }

    #[test]
    fn test_locate_card_missing_binary_falls_back() {
        // With a bogus aplay path the locator must not panic; it falls
        // through to the sysfs scan and may or may not find real hardware.
        let _ = locate_card("US144MKII", "/nonexistent/aplay");
    }
}
