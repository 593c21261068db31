//! services/storefront/src/bin/import_catalog.rs
//!
//! Replaces the exam catalog collections with the contents of a workbook.

use ce_storefront_core::{CatalogImporter, ImportSummary};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use storefront_lib::{
    adapters::{CalamineWorkbookLoader, MongoCatalogStore},
    config::ImportConfig,
    error::StorefrontError,
    init_tracing,
};
use tracing::{error, info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Load the exam catalog workbook into the database")]
struct Args {
    /// Workbook to import; defaults to IMPORT_WORKBOOK or ExamData.xlsx.
    workbook: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = ImportConfig::from_env();
    init_tracing(config.as_ref().map_or(Level::INFO, |c| c.log_level));

    let result = match config {
        Ok(config) => run(config, args).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(summary) => {
            for report in &summary.reports {
                info!(
                    "{}: {} rows, {} inserted, {} rejected, {} in collection",
                    report.collection,
                    report.attempted,
                    report.inserted,
                    report.failures.len(),
                    report.final_count
                );
            }
            info!("Import complete.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Import failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ImportConfig, args: Args) -> Result<ImportSummary, StorefrontError> {
    let workbook_path = args.workbook.unwrap_or_else(|| config.workbook_path.clone());

    // --- 2. Connect to Database ---
    info!("Connecting to database...");
    let store = Arc::new(MongoCatalogStore::connect(&config).await?);

    // --- 3. Run the Import ---
    let importer = CatalogImporter::new(store.clone(), Arc::new(CalamineWorkbookLoader::new()))
        .with_batch_size(config.batch_size);
    let result = importer.run(&workbook_path).await;

    store.close().await;
    Ok(result?)
}
