//! crates/ce_storefront_core/src/import/mod.rs
//!
//! The catalog import: replaces the three exam collections with the contents of
//! a workbook. Collections are dropped first, every sheet row is normalized into
//! a record, and records are loaded in sequential unordered batches.

pub mod mapping;
pub mod query;

use crate::domain::{CatalogCollection, CollectionReport, ImportSummary};
use crate::ports::{CatalogStore, PortError, WorkbookLoader};
use crate::workbook::{Workbook, Worksheet};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub const COURSE_SHEET: &str = "Course List";
pub const QA_SHEET: &str = "Q&A";
pub const CERT_SHEET: &str = "State Cert Tracking";

pub const DEFAULT_BATCH_SIZE: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Store error: {0}")]
    Store(#[from] PortError),
    #[error("Could not read workbook {path}: {source}")]
    Workbook { path: String, source: PortError },
    #[error("Worksheet '{0}' is missing from the workbook")]
    MissingSheet(String),
    #[error("Worksheet '{sheet}' has {found} columns, expected at least {expected}")]
    SheetShape {
        sheet: String,
        expected: usize,
        found: usize,
    },
    #[error("Could not serialize a record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Runs a full-replace import of the exam catalog.
pub struct CatalogImporter {
    store: Arc<dyn CatalogStore>,
    loader: Arc<dyn WorkbookLoader>,
    batch_size: usize,
}

impl CatalogImporter {
    pub fn new(store: Arc<dyn CatalogStore>, loader: Arc<dyn WorkbookLoader>) -> Self {
        Self {
            store,
            loader,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub async fn run(&self, workbook_path: &Path) -> Result<ImportSummary, ImportError> {
        for collection in CatalogCollection::ALL {
            self.drop_if_present(collection).await?;
        }

        info!("Reading workbook {}", workbook_path.display());
        let workbook = self
            .loader
            .load(workbook_path)
            .map_err(|source| ImportError::Workbook {
                path: workbook_path.display().to_string(),
                source,
            })?;

        let course_sheet = required_sheet(&workbook, COURSE_SHEET)?;
        let courses = to_documents(course_sheet.rows.iter().map(mapping::course_record))?;

        let qa_sheet = required_sheet(&workbook, QA_SHEET)?;
        let questions = to_documents(qa_sheet.rows.iter().map(mapping::qa_record))?;

        let cert_sheet = required_sheet(&workbook, CERT_SHEET)?;
        mapping::validate_cert_shape(cert_sheet)?;
        let first_header = cert_sheet.headers[0].as_str();
        let certs = to_documents(
            cert_sheet
                .rows
                .iter()
                .filter_map(|row| mapping::cert_record(first_header, row)),
        )?;

        info!(
            "Parsed {} courses, {} questions, {} cert rows",
            courses.len(),
            questions.len(),
            certs.len()
        );

        let mut reports = Vec::with_capacity(3);
        for (collection, documents) in [
            (CatalogCollection::Courses, courses),
            (CatalogCollection::QAndA, questions),
            (CatalogCollection::CertTracking, certs),
        ] {
            reports.push(self.load_collection(collection, documents).await?);
        }

        // Counts are taken only once every collection has been loaded.
        for report in &mut reports {
            report.final_count = self.store.count_documents(report.collection).await?;
            info!("{}: {} documents", report.collection, report.final_count);
        }

        Ok(ImportSummary { reports })
    }

    async fn drop_if_present(&self, collection: CatalogCollection) -> Result<(), ImportError> {
        match self.store.drop_collection(collection).await {
            Ok(()) => {
                info!("Dropped collection {}", collection);
                Ok(())
            }
            Err(PortError::NamespaceMissing(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Inserts `documents` batch by batch, waiting for each before the next.
    async fn load_collection(
        &self,
        collection: CatalogCollection,
        documents: Vec<serde_json::Value>,
    ) -> Result<CollectionReport, ImportError> {
        let total = documents.len();
        let mut inserted = 0usize;
        let mut failures = Vec::new();

        let mut remaining = documents.into_iter().peekable();
        while remaining.peek().is_some() {
            let batch: Vec<serde_json::Value> =
                remaining.by_ref().take(self.batch_size).collect();
            let outcome = self.store.insert_unordered(collection, batch).await?;
            inserted += outcome.inserted_count;
            for failure in &outcome.failures {
                warn!(
                    "{}: document {} of batch rejected: {}",
                    collection, failure.index, failure.message
                );
            }
            failures.extend(outcome.failures);
            info!("{}: inserted {}/{}", collection, inserted, total);
        }

        Ok(CollectionReport {
            collection,
            attempted: total,
            inserted,
            failures,
            final_count: 0,
        })
    }
}

fn required_sheet<'a>(workbook: &'a Workbook, name: &str) -> Result<&'a Worksheet, ImportError> {
    workbook
        .sheet(name)
        .ok_or_else(|| ImportError::MissingSheet(name.to_string()))
}

fn to_documents<T: Serialize>(
    records: impl Iterator<Item = T>,
) -> Result<Vec<serde_json::Value>, ImportError> {
    records
        .map(|record| serde_json::to_value(record).map_err(ImportError::from))
        .collect()
}
