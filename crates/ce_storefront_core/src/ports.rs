//! crates/ce_storefront_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core logic depends on.
//! The cart persists through a `KeyValueStore`, and the catalog import reads a
//! workbook through a `WorkbookLoader` and writes through a `CatalogStore`.

use crate::domain::{BatchOutcome, CatalogCollection};
use crate::workbook::Workbook;
use async_trait::async_trait;
use std::path::Path;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, filesystem).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The collection being dropped does not exist yet.
    #[error("Namespace does not exist: {0}")]
    NamespaceMissing(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Durable string storage keyed by a fixed key, in the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> PortResult<()>;
}

/// Reads a spreadsheet file into an in-memory `Workbook`.
pub trait WorkbookLoader: Send + Sync {
    fn load(&self, path: &Path) -> PortResult<Workbook>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Drops the collection. Returns `PortError::NamespaceMissing` if it does not exist.
    async fn drop_collection(&self, collection: CatalogCollection) -> PortResult<()>;

    /// Inserts every document it can; a rejected document does not stop the rest.
    async fn insert_unordered(
        &self,
        collection: CatalogCollection,
        documents: Vec<serde_json::Value>,
    ) -> PortResult<BatchOutcome>;

    async fn count_documents(&self, collection: CatalogCollection) -> PortResult<u64>;
}
