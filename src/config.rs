//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Data source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Path to the CSV file backing the dashboard
    #[serde(default = "default_source_path")]
    pub path: String,

    /// Primary format for the date columns
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_source_path() -> String {
    "data.csv".to_string()
}

fn default_date_format() -> String {
    crate::data::source::DEFAULT_DATE_FORMAT.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_source_path(),
            date_format: default_date_format(),
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

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Dashboard mount configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Pathname prefix the dashboard is mounted under
    #[serde(default = "default_pathname_prefix")]
    pub pathname_prefix: String,
}

fn default_pathname_prefix() -> String {
    "/dashapp".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            pathname_prefix: default_pathname_prefix(),
        }
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
        let config_paths = [
            dirs::config_dir().map(|p| p.join("opsboard").join("config.toml")),
            Some(PathBuf::from("/etc/opsboard/config.toml")),
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
        // Source overrides
        if let Ok(path) = std::env::var("OPSBOARD_SOURCE_PATH") {
            self.source.path = path;
        }
        if let Ok(format) = std::env::var("OPSBOARD_DATE_FORMAT") {
            self.source.date_format = format;
        }

        // API overrides
        if let Ok(host) = std::env::var("OPSBOARD_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("OPSBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Dashboard overrides
        if let Ok(prefix) = std::env::var("OPSBOARD_PATHNAME_PREFIX") {
            self.dashboard.pathname_prefix = prefix;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("OPSBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("OPSBOARD_LOG_FORMAT") {
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
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Opsboard Configuration
#
# Environment variables override these settings:
# - OPSBOARD_SOURCE_PATH
# - OPSBOARD_DATE_FORMAT
# - OPSBOARD_HOST
# - OPSBOARD_PORT
# - OPSBOARD_PATHNAME_PREFIX
# - OPSBOARD_LOG_LEVEL
# - OPSBOARD_LOG_FORMAT

[source]
# CSV file backing the dashboard
path = "data.csv"

# Primary format for the Date / First of the Year columns
date_format = "%Y-%m-%d"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8080

# Allowed CORS origins (empty = permissive)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[dashboard]
# Pathname prefix the dashboard is mounted under
pathname_prefix = "/dashapp"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/opsboard/opsboard.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source.path, "data.csv");
        assert_eq!(config.dashboard.pathname_prefix, "/dashapp");
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.source.date_format, "%Y-%m-%d");
        assert_eq!(config.dashboard.pathname_prefix, "/dashapp");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.source.path, "data.csv");
    }
}
