//! Configuration structures for appscout.
//!
//! This module provides configuration types for the discovery engine:
//!
//! - [`ScanConfig`] - Scanner settings (worker count, deadline, buffering)
//! - [`CatalogConfig`] - Application catalog settings (user override path)
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] with sensible values and
//! deserialize with `#[serde(default)]`, so partial config files work.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of concurrent probe workers.
///
/// Small and fixed regardless of catalog size, to avoid a thundering herd
/// of stat calls against the filesystem.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Default scan deadline in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default capacity of the results channel between workers and collector.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 20;

/// Configuration for the concurrent scanner.
///
/// # Examples
///
/// ```
/// use scout_core::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert_eq!(config.concurrency, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of concurrent probe workers.
    ///
    /// Fixed at scan start and independent of catalog size. Must be at
    /// least 1.
    pub concurrency: usize,

    /// Overall scan deadline in milliseconds.
    ///
    /// A scan that exceeds the deadline is cancelled and reports
    /// a deadline error instead of a snapshot.
    pub timeout_ms: u64,

    /// Capacity of the bounded results channel.
    pub channel_capacity: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ScanConfig {
    /// Sets the worker count.
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the scan deadline in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if `concurrency` or
    /// `channel_capacity` is zero, or if the deadline is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::invalid_option(
                "concurrency",
                "must be at least 1",
            ));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::invalid_option(
                "channel_capacity",
                "must be at least 1",
            ));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::invalid_option(
                "timeout_ms",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Configuration for the application catalog.
///
/// # Examples
///
/// ```
/// use scout_core::CatalogConfig;
///
/// let config = CatalogConfig::default();
/// assert!(config.user_catalog.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to a user catalog file that extends or overrides the embedded
    /// catalog. `None` means use the default location
    /// (`~/.config/appscout/apps.json`).
    pub user_catalog: Option<Utf8PathBuf>,

    /// Whether to merge the user catalog at all.
    pub use_user_catalog: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            user_catalog: None,
            use_user_catalog: true,
        }
    }
}

/// Root configuration for appscout.
///
/// Combines all component configurations into a single structure that can
/// be loaded from a configuration file or constructed programmatically.
///
/// # Examples
///
/// ```
/// use scout_core::Config;
///
/// let config = Config::default();
/// let json = serde_json::to_string_pretty(&config).unwrap();
/// assert!(json.contains("concurrency"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanner configuration.
    pub scan: ScanConfig,

    /// Catalog configuration.
    pub catalog: CatalogConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_config_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scan_config_builders() {
        let config = ScanConfig::default()
            .with_concurrency(8)
            .with_timeout_ms(500);
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.timeout_ms, 500);
    }

    #[test]
    fn test_scan_config_rejects_zero_concurrency() {
        let config = ScanConfig::default().with_concurrency(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scan_config_rejects_zero_timeout() {
        let config = ScanConfig::default().with_timeout_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"scan": {"concurrency": 2}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.scan.concurrency, 2);
        // Other fields should have defaults
        assert_eq!(config.scan.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(config.catalog.user_catalog.is_none());
    }
}
