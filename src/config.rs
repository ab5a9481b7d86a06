//! Configuration System
//!
//! Provides hierarchical configuration loading from:
//! - config.toml (default configuration)
//! - config.local.toml (git-ignored local overrides)
//! - Environment variables (TIMESTREAM_* prefix)
//!
//! ## Example
//!
//! ```toml
//! # config.toml
//! [query]
//! debug_query = true
//! pagination = "concatenate"
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```
//!
//! Environment variable overrides:
//! ```bash
//! TIMESTREAM_QUERY__DEBUG_QUERY=true
//! TIMESTREAM_LOGGING__FORMAT=json
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

const ENV_PREFIX: &str = "TIMESTREAM_";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub query: QuerySettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Query paginator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Log request parameters, status and column metadata of every page
    #[serde(default)]
    pub debug_query: bool,

    /// What to return when a query spans several pages
    #[serde(default)]
    pub pagination: PaginationStrategy,
}

/// How pages of a multi-page query are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationStrategy {
    /// Only the final page's rows are returned
    #[default]
    LastPage,
    /// Rows of every page are returned in page order
    Concatenate,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or EnvFilter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Append to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Merges in order:
    /// 1. config.toml (base configuration)
    /// 2. config.local.toml (local overrides, git-ignored)
    /// 3. Environment variables (TIMESTREAM_* prefix)
    pub fn load() -> Result<Self> {
        let config = Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Toml::file("config.local.toml"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }

    /// Load configuration from specific file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.query.debug_query);
        assert_eq!(config.query.pagination, PaginationStrategy::LastPage);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "text");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let mut config = Config::default();
        config.query.debug_query = true;
        config.query.pagination = PaginationStrategy::Concatenate;
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("[query]"));
        assert!(toml_str.contains("pagination = \"concatenate\""));

        let back: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.query, config.query);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.query.debug_query);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_pagination_strategy_serde() {
        let json = serde_json::to_string(&PaginationStrategy::LastPage).unwrap();
        assert_eq!(json, "\"last_page\"");
        let json = serde_json::to_string(&PaginationStrategy::Concatenate).unwrap();
        assert_eq!(json, "\"concatenate\"");
    }
}
