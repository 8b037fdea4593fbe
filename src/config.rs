//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use chrono::FixedOffset;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Event store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("tally").to_string_lossy().to_string())
        .unwrap_or_else(|| "./tally_data".to_string())
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Default number of records returned by the list endpoint
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_list_limit() -> usize {
    50
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            list_limit: default_list_limit(),
        }
    }
}

/// Chart and aggregation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    /// Label assumed when a request does not name one
    #[serde(default = "default_label")]
    pub default_label: String,

    /// Calendar basis for bucketing, as a fixed `±HH:MM` UTC offset
    ///
    /// Applied uniformly to chart buckets, date-only search bounds, and the
    /// stats "today" window.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

fn default_label() -> String {
    "default".to_string()
}

fn default_utc_offset() -> String {
    "+00:00".to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_label: default_label(),
            utc_offset: default_utc_offset(),
        }
    }
}

impl ChartConfig {
    /// Parse the configured offset into a calendar basis
    pub fn calendar(&self) -> Result<FixedOffset, ConfigError> {
        self.utc_offset
            .parse::<FixedOffset>()
            .map_err(|e| ConfigError::Invalid {
                field: "chart.utc_offset".to_string(),
                error: format!("{} ({:?})", e, self.utc_offset),
            })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("tally").join("config.toml")),
            Some(PathBuf::from("/etc/tally/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Store overrides
        if let Ok(data_dir) = std::env::var("TALLY_DATA_DIR") {
            self.store.data_dir = data_dir;
        }

        // API overrides
        if let Ok(host) = std::env::var("TALLY_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("TALLY_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }
        if let Ok(limit) = std::env::var("TALLY_LIST_LIMIT") {
            if let Ok(l) = limit.parse() {
                self.api.list_limit = l;
            }
        }

        // Chart overrides
        if let Ok(label) = std::env::var("TALLY_DEFAULT_LABEL") {
            self.chart.default_label = label;
        }
        if let Ok(offset) = std::env::var("TALLY_UTC_OFFSET") {
            self.chart.utc_offset = offset;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("TALLY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TALLY_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {field}: {error}")]
    Invalid { field: String, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Tally Configuration
#
# Environment variables override these settings:
# - TALLY_DATA_DIR
# - TALLY_API_HOST
# - TALLY_API_PORT
# - TALLY_LIST_LIMIT
# - TALLY_DEFAULT_LABEL
# - TALLY_UTC_OFFSET
# - TALLY_LOG_LEVEL
# - TALLY_LOG_FORMAT

[store]
# Directory for the events database
data_dir = "~/.local/share/tally"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Default number of records returned by GET /api/v1/records
list_limit = 50

[chart]
# Label recorded and charted when a request does not name one
default_label = "default"

# Calendar basis for day/month/year buckets, as a fixed UTC offset.
# "+00:00" keeps everything in UTC; "+09:00" buckets by Tokyo wall clock.
utc_offset = "+00:00"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/tally/tally.log"
"#
    .to_string()
}
