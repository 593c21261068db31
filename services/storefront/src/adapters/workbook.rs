//! services/storefront/src/adapters/workbook.rs
//!
//! Reads `.xlsx`/`.xls`/`.ods` workbooks with calamine and hands them to the core
//! as an in-memory `Workbook`.

use calamine::{open_workbook_auto, Data, Reader};
use ce_storefront_core::ports::{PortError, PortResult, WorkbookLoader};
use ce_storefront_core::workbook::{CellValue, Workbook, Worksheet};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct CalamineWorkbookLoader;

impl CalamineWorkbookLoader {
    pub fn new() -> Self {
        Self
    }
}

impl WorkbookLoader for CalamineWorkbookLoader {
    fn load(&self, path: &Path) -> PortResult<Workbook> {
        if !path.is_file() {
            return Err(PortError::NotFound(path.display().to_string()));
        }
        let mut workbook =
            open_workbook_auto(path).map_err(|e| PortError::Unexpected(e.to_string()))?;

        let names = workbook.sheet_names().to_vec();
        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| PortError::Unexpected(format!("{}: {}", name, e)))?;
            let grid = to_grid(range.rows());
            debug!("Read worksheet '{}' with {} rows", name, grid.len());
            sheets.push(Worksheet::from_grid(name, grid));
        }
        Ok(Workbook { sheets })
    }
}

fn to_grid<'a>(rows: impl Iterator<Item = &'a [Data]>) -> Vec<Vec<Option<CellValue>>> {
    rows.map(|row| row.iter().map(cell_value).collect()).collect()
}

/// Converts a raw cell. Dates keep their serial number, errors keep their display text.
fn cell_value(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            Some(CellValue::Text(s.clone()))
        }
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::Error(e) => Some(CellValue::Text(e.to_string())),
    }
}
