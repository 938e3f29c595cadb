// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the chordsheet tool.
//!
//! Settings live in a small TOML file; every field has a default so an
//! empty or missing file is valid.

pub mod watcher;

pub use watcher::{validate_song, SongEvent, SongWatcher};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::song::STACK_DELIMITER;

/// Tool settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Delimiter splitting chord/lyric entries into stacked lines
    #[serde(default = "default_stack_delimiter")]
    pub stack_delimiter: char,
    /// Print the song title above the sheet
    #[serde(default = "default_show_title")]
    pub show_title: bool,
    /// Semitones applied when no `--steps` is given
    #[serde(default)]
    pub default_steps: i32,
    /// Watcher debounce in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_stack_delimiter() -> char {
    STACK_DELIMITER
}
fn default_show_title() -> bool {
    true
}
fn default_debounce_ms() -> u64 {
    500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stack_delimiter: default_stack_delimiter(),
            show_title: default_show_title(),
            default_steps: 0,
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Load settings from `path`; no path or a missing file gives defaults.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.exists() => {
                debug!(path = ?path, "Settings file not found, using defaults");
                Ok(Self::default())
            }
            Some(path) => {
                let settings = Self::load(path)?;
                debug!(?settings, "Loaded settings");
                Ok(settings)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse settings TOML")
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize settings to TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_settings() {
        let text = r#"
stack_delimiter = "|"
show_title = false
default_steps = -2
debounce_ms = 250
"#;
        let settings = Settings::from_toml(text).unwrap();
        assert_eq!(settings.stack_delimiter, '|');
        assert!(!settings.show_title);
        assert_eq!(settings.default_steps, -2);
        assert_eq!(settings.debounce_ms, 250);
    }

    #[test]
    fn test_default_values() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.stack_delimiter, '.');
        assert!(settings.show_title);
        assert_eq!(settings.default_steps, 0);
        assert_eq!(settings.debounce_ms, 500);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(Settings::from_toml("show_title = \"maybe\"").is_err());
    }

    #[test]
    fn test_round_trip() {
        let original = Settings {
            stack_delimiter: '/',
            show_title: false,
            default_steps: 3,
            debounce_ms: 100,
        };
        let parsed = Settings::from_toml(&original.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(Settings::load_or_default(None).unwrap(), Settings::default());

        let dir = tempdir().unwrap();
        let path = dir.path().join("chordsheet.toml");
        fs::write(&path, "default_steps = 5\n").unwrap();
        let settings = Settings::load_or_default(Some(&path)).unwrap();
        assert_eq!(settings.default_steps, 5);
        assert!(settings.show_title);

        let missing = dir.path().join("missing.toml");
        assert_eq!(Settings::load_or_default(Some(&missing)).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_or_default_rejects_bad_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "debounce_ms = \"soon\"\n").unwrap();
        assert!(Settings::load_or_default(Some(&path)).is_err());
    }
}
