//! # Error Types Module
//!
//! Centralized error handling for the Vibrator Control application.
//!
//! ## Error Types
//! - `DiscoveryError`: Bluetooth device discovery failures
//! - `ConfigError`: Configuration file I/O and parsing errors
//!
//! Discovery failures are logged and otherwise ignored by the UI, so
//! `DiscoveryError` carries rendered messages rather than the backend's
//! error values. That keeps it `Clone` for use inside UI messages.

use std::fmt;

/// Errors that can occur while discovering Bluetooth devices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// Bluetooth manager initialization failed
    ManagerInit(String),
    /// No Bluetooth adapter available on this machine
    NoAdapter,
    /// Scan start, stop, or peripheral listing failed
    ScanFailed(String),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::ManagerInit(msg) => {
                write!(f, "Failed to initialize Bluetooth manager: {}", msg)
            }
            DiscoveryError::NoAdapter => {
                write!(f, "No Bluetooth adapter found. Please ensure Bluetooth is enabled.")
            }
            DiscoveryError::ScanFailed(msg) => {
                write!(f, "Device scan failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Errors that can occur during configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read config file
    ReadFailed(std::io::Error),
    /// Failed to write config file
    WriteFailed(std::io::Error),
    /// Failed to parse config file
    ParseFailed(toml::de::Error),
    /// Failed to serialize config
    SerializeFailed(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFailed(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::WriteFailed(e) => write!(f, "Failed to write config file: {}", e),
            ConfigError::ParseFailed(e) => write!(f, "Failed to parse config file: {}", e),
            ConfigError::SerializeFailed(e) => write!(f, "Failed to serialize config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadFailed(e) => Some(e),
            ConfigError::WriteFailed(e) => Some(e),
            ConfigError::ParseFailed(e) => Some(e),
            ConfigError::SerializeFailed(e) => Some(e),
        }
    }
}
