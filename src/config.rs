use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub notification: NotificationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Bounded delay before the first scan of a new search request
    #[serde(default = "default_initial_scan_delay_ms")]
    pub initial_scan_delay_ms: u64,
    /// Re-scan cadence while a request stays active
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,
    /// Acceptance threshold for the 0-100 match score
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            initial_scan_delay_ms: default_initial_scan_delay_ms(),
            scan_interval_secs: default_scan_interval_secs(),
            score_threshold: default_score_threshold(),
        }
    }
}

fn default_initial_scan_delay_ms() -> u64 { 1500 }
fn default_scan_interval_secs() -> u64 { 30 }
fn default_score_threshold() -> f64 { 40.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    /// How long a notification stays visible before auto-hiding
    #[serde(default = "default_display_window_secs")]
    pub display_window_secs: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            display_window_secs: default_display_window_secs(),
        }
    }
}

fn default_display_window_secs() -> u64 { 4 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with TREASURE_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with TREASURE_)
            // e.g., TREASURE_MATCHING__SCAN_INTERVAL_SECS -> matching.scan_interval_secs
            .add_source(
                Environment::with_prefix("TREASURE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TREASURE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
