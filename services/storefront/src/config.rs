//! services/storefront/src/config.rs
//!
//! Defines the configuration structures for the storefront binaries and their loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use ce_storefront_core::import::DEFAULT_BATCH_SIZE;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_WORKBOOK: &str = "ExamData.xlsx";
pub const DEFAULT_DB_NAME: &str = "ce_storefront";
pub const DEFAULT_CART_FILE: &str = "cart.json";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Settings for the catalog import.
#[derive(Clone, Debug)]
pub struct ImportConfig {
    pub mongo_uri: String,
    pub mongo_db_name: Option<String>,
    pub connect_timeout: Duration,
    pub workbook_path: PathBuf,
    pub batch_size: usize,
    pub log_level: Level,
}

/// Settings for the command-line cart.
#[derive(Clone, Debug)]
pub struct CartConfig {
    pub cart_file: PathBuf,
    pub log_level: Level,
}

impl ImportConfig {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongo_uri = lookup("MONGO_URI")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("MONGO_URI".to_string()))?;

        let mongo_db_name = lookup("MONGO_DB_NAME").filter(|v| !v.trim().is_empty());

        let timeout_secs = match lookup("MONGO_CONNECT_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("MONGO_CONNECT_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => 10,
        };

        let workbook_path = lookup("IMPORT_WORKBOOK")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKBOOK));

        let batch_size = match lookup("IMPORT_BATCH_SIZE") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "IMPORT_BATCH_SIZE".to_string(),
                        format!("'{}' is not a positive integer", raw),
                    ))
                }
            },
            None => DEFAULT_BATCH_SIZE,
        };

        Ok(Self {
            mongo_uri,
            mongo_db_name,
            connect_timeout: Duration::from_secs(timeout_secs),
            workbook_path,
            batch_size,
            log_level: log_level(&lookup)?,
        })
    }
}

impl CartConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cart_file = lookup("CART_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CART_FILE));
        Ok(Self {
            cart_file,
            log_level: log_level(&lookup)?,
        })
    }
}

fn load_dotenv() {
    // Only load from .env in non-test mode to avoid contamination.
    if !cfg!(test) {
        dotenvy::dotenv().ok();
    }
}

fn log_level<F>(lookup: &F) -> Result<Level, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
    log_level_str.parse::<Level>().map_err(|_| {
        ConfigError::InvalidValue(
            "RUST_LOG".to_string(),
            format!("'{}' is not a valid log level", log_level_str),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn mongo_uri_is_required() {
        let err = ImportConfig::from_lookup(env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(var) if var == "MONGO_URI"));
    }

    #[test]
    fn import_defaults_apply() {
        let config = ImportConfig::from_lookup(env(&[("MONGO_URI", "mongodb://localhost")])).unwrap();
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.workbook_path, PathBuf::from(DEFAULT_WORKBOOK));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.mongo_db_name.is_none());
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = ImportConfig::from_lookup(env(&[
            ("MONGO_URI", "mongodb://localhost"),
            ("IMPORT_BATCH_SIZE", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "IMPORT_BATCH_SIZE"));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let err = CartConfig::from_lookup(env(&[("RUST_LOG", "chatty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "RUST_LOG"));
    }

    #[test]
    fn cart_file_can_be_overridden() {
        let config = CartConfig::from_lookup(env(&[("CART_FILE", "/tmp/c.json")])).unwrap();
        assert_eq!(config.cart_file, PathBuf::from("/tmp/c.json"));
    }
}
