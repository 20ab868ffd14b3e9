//! Configuration Module
//!
//! Handles loading the in-memory store and cleanup settings from environment variables.

use std::env;

use crate::cache::MAX_KEY_LENGTH;

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the memory store can hold
    pub max_entries: usize,
    /// Maximum key length in bytes accepted by the memory store
    pub max_key_length: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum store entries (default: 1000)
    /// - `MAX_KEY_LENGTH` - Maximum key length in bytes (default: 256)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            max_key_length: parse_var("MAX_KEY_LENGTH").unwrap_or(defaults.max_key_length),
            cleanup_interval: parse_var("CLEANUP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            max_key_length: MAX_KEY_LENGTH,
            cleanup_interval: 1,
        }
    }
}
