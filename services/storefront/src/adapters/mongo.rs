//! services/storefront/src/adapters/mongo.rs
//!
//! This module contains the MongoDB adapter, the concrete implementation of the
//! `CatalogStore` port from the `core` crate. It handles the collection drops,
//! unordered bulk inserts and counts the catalog import needs.

use crate::config::{ImportConfig, DEFAULT_DB_NAME};
use crate::error::StorefrontError;
use async_trait::async_trait;
use ce_storefront_core::domain::{BatchOutcome, CatalogCollection, InsertFailure};
use ce_storefront_core::ports::{CatalogStore, PortError, PortResult};
use chrono::Utc;
use mongodb::bson::{self, doc, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::future::IntoFuture;
use tracing::{info, warn};

/// Server error code for "ns not found".
const NAMESPACE_NOT_FOUND: i32 = 26;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A document store adapter that implements the `CatalogStore` port.
#[derive(Clone)]
pub struct MongoCatalogStore {
    client: Client,
    db: Database,
}

impl MongoCatalogStore {
    /// Connects and pings the server, giving up after the configured timeout.
    pub async fn connect(config: &ImportConfig) -> Result<Self, StorefrontError> {
        let mut options = ClientOptions::parse(&config.mongo_uri).await?;
        options.server_selection_timeout = Some(config.connect_timeout);
        options.connect_timeout = Some(config.connect_timeout);
        options.app_name = Some("import_catalog".to_string());

        let client = Client::with_options(options)?;
        let db = match &config.mongo_db_name {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DB_NAME)),
        };

        let ping = db.run_command(doc! { "ping": 1 }).into_future();
        tokio::time::timeout(config.connect_timeout, ping)
            .await
            .map_err(|_| StorefrontError::ConnectTimeout(config.connect_timeout.as_secs()))??;

        info!("Connected to database {}", db.name());
        Ok(Self { client, db })
    }

    /// Closes the underlying client once the run is over.
    pub async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}

fn stamp(value: serde_json::Value, now: bson::DateTime) -> PortResult<Document> {
    let mut document =
        bson::to_document(&value).map_err(|e| PortError::Unexpected(e.to_string()))?;
    document.insert("createdAt", now);
    document.insert("updatedAt", now);
    Ok(document)
}

/// Splits a failed unordered insert into what got written and what did not.
fn partial_outcome(attempted: usize, error: MongoError) -> PortResult<BatchOutcome> {
    match *error.kind {
        ErrorKind::InsertMany(ref failure) => {
            if let Some(concern) = &failure.write_concern_error {
                warn!("Write concern not satisfied: {}", concern.message);
            }
            let failures: Vec<InsertFailure> = failure
                .write_errors
                .iter()
                .flatten()
                .map(|e| InsertFailure {
                    index: e.index,
                    message: e.message.clone(),
                })
                .collect();
            Ok(BatchOutcome {
                inserted_count: attempted.saturating_sub(failures.len()),
                failures,
            })
        }
        _ => Err(PortError::Unexpected(error.to_string())),
    }
}

//=========================================================================================
// `CatalogStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl CatalogStore for MongoCatalogStore {
    /// Drops `collection`.
    ///
    /// The driver already treats dropping a missing collection as success in most
    /// cases. Code 26 ("ns not found") is still mapped to `NamespaceMissing` for
    /// servers and driver paths that report it.
    async fn drop_collection(&self, collection: CatalogCollection) -> PortResult<()> {
        self.db
            .collection::<Document>(collection.name())
            .drop()
            .await
            .map_err(|e| match *e.kind {
                ErrorKind::Command(ref command) if command.code == NAMESPACE_NOT_FOUND => {
                    PortError::NamespaceMissing(collection.name().to_string())
                }
                _ => PortError::Unexpected(e.to_string()),
            })
    }

    async fn insert_unordered(
        &self,
        collection: CatalogCollection,
        documents: Vec<serde_json::Value>,
    ) -> PortResult<BatchOutcome> {
        if documents.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let now = bson::DateTime::from_millis(Utc::now().timestamp_millis());
        let documents = documents
            .into_iter()
            .map(|value| stamp(value, now))
            .collect::<PortResult<Vec<Document>>>()?;
        let attempted = documents.len();

        match self
            .db
            .collection::<Document>(collection.name())
            .insert_many(documents)
            .ordered(false)
            .await
        {
            Ok(result) => Ok(BatchOutcome {
                inserted_count: result.inserted_ids.len(),
                failures: Vec::new(),
            }),
            Err(e) => partial_outcome(attempted, e),
        }
    }

    async fn count_documents(&self, collection: CatalogCollection) -> PortResult<u64> {
        self.db
            .collection::<Document>(collection.name())
            .count_documents(doc! {})
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}
