//! services/storefront/src/error.rs
//!
//! Defines the primary error type for the storefront service binaries.

use crate::config::ConfigError;
use ce_storefront_core::import::ImportError;
use ce_storefront_core::ports::PortError;

/// The primary error type for the `storefront` service.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a fatal failure of the catalog import.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database driver.
    #[error("Database Error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// The database did not answer within the configured wait.
    #[error("Timed out after {0}s waiting for the database")]
    ConnectTimeout(u64),
}
