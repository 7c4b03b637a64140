//! # Configuration Management Module
//!
//! Persistent application settings stored in platform-appropriate locations.
//!
//! ## Settings
//! - `tick_interval_ms`: Period of the trace animation tick
//! - `scan_duration_secs`: How long a Bluetooth scan listens for advertisements
//! - `deduplicate_devices`: Skip discovered devices whose id is already listed
//!
//! ## Storage Location
//! - macOS: ~/Library/Application Support/vibrator-control/config.toml
//! - Linux: ~/.config/vibrator-control/config.toml
//! - Windows: %APPDATA%\vibrator-control\config.toml

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "vibrator-control";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tick_interval_ms: u64,
    pub scan_duration_secs: u64,
    pub deduplicate_devices: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            scan_duration_secs: 5,
            deduplicate_devices: false,
        }
    }
}

impl Config {
    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Load config from the platform config dir, creating the default if missing
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, writing the default there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(ConfigError::ParseFailed),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, writing defaults", path.display());
                let config = Self::default();
                config.save_to(path)?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::ReadFailed(e)),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::WriteFailed)?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(ConfigError::SerializeFailed)?;
        fs::write(path, toml_string).map_err(ConfigError::WriteFailed)?;

        Ok(())
    }

    /// Tick period, never shorter than one millisecond
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn scan_duration(&self) -> Duration {
        Duration::from_secs(self.scan_duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(10));
        assert_eq!(config.scan_duration(), Duration::from_secs(5));
        assert!(!config.deduplicate_devices);
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            tick_interval_ms = 25
            deduplicate_devices = true
        "#;

        let config: Config = toml::from_str(toml_str).expect("Failed to deserialize");
        assert_eq!(config.tick_interval_ms, 25);
        assert!(config.deduplicate_devices);
        // Missing keys fall back to defaults
        assert_eq!(config.scan_duration_secs, 5);
    }

    #[test]
    fn test_zero_tick_interval_is_clamped() {
        let config = Config {
            tick_interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = Config::load_from(&path).expect("Failed to load config");
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = Config {
            tick_interval_ms: 16,
            scan_duration_secs: 2,
            deduplicate_devices: true,
        };

        config.save_to(&path).expect("Failed to save config");
        let loaded = Config::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "tick_interval_ms = \"fast\"").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseFailed(_))));
    }
}
