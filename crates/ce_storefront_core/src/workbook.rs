//! crates/ce_storefront_core/src/workbook.rs
//!
//! An in-memory view of a spreadsheet workbook, independent of any file format.
//! Rows are keyed by header text and only carry the cells that are present, so a
//! row's own key list can be shorter than the header row.

use std::collections::HashMap;
use std::fmt;

/// A non-blank cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            // f64's Display already drops the fraction for integral values.
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// One data row: `(header, value)` pairs in column order, blanks omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    pub cells: Vec<(String, CellValue)>,
}

impl SheetRow {
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    /// The value at `index` in this row's own key list.
    pub fn nth(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worksheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

impl Worksheet {
    /// Builds a worksheet from a raw grid whose first row is the header row.
    ///
    /// Blank header cells become `__EMPTY`, `__EMPTY_1`, ... and repeated header
    /// text is suffixed `_1`, `_2`, ... so every key in a row is unique. Blank
    /// data cells are dropped and rows without any present cell are skipped.
    pub fn from_grid(name: impl Into<String>, grid: Vec<Vec<Option<CellValue>>>) -> Self {
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let mut lines = grid.into_iter();
        let mut header_cells = lines.next().unwrap_or_default();
        header_cells.resize(width, None);
        let headers = normalize_headers(&header_cells);

        let rows = lines
            .filter_map(|line| {
                let cells: Vec<(String, CellValue)> = line
                    .into_iter()
                    .enumerate()
                    .filter_map(|(col, cell)| {
                        let value = cell?;
                        Some((headers[col].clone(), value))
                    })
                    .collect();
                (!cells.is_empty()).then_some(SheetRow { cells })
            })
            .collect();

        Self {
            name: name.into(),
            headers,
            rows,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

fn normalize_headers(cells: &[Option<CellValue>]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut empties = 0usize;
    cells
        .iter()
        .map(|cell| {
            let text = cell
                .as_ref()
                .map(|v| v.to_string().trim().to_string())
                .unwrap_or_default();
            if text.is_empty() {
                let header = if empties == 0 {
                    "__EMPTY".to_string()
                } else {
                    format!("__EMPTY_{}", empties)
                };
                empties += 1;
                return header;
            }
            let n = seen.entry(text.clone()).or_insert(0);
            let header = if *n == 0 {
                text
            } else {
                format!("{}_{}", text, n)
            };
            *n += 1;
            header
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<CellValue> {
        Some(CellValue::from(s))
    }

    #[test]
    fn duplicate_and_blank_headers_are_disambiguated() {
        let sheet = Worksheet::from_grid(
            "S",
            vec![vec![text("Name"), None, text("Name"), text(" Name "), None]],
        );
        assert_eq!(
            sheet.headers,
            vec!["Name", "__EMPTY", "Name_1", "Name_2", "__EMPTY_1"]
        );
    }

    #[test]
    fn blank_cells_are_omitted_and_shift_positions() {
        let sheet = Worksheet::from_grid(
            "S",
            vec![
                vec![text("A"), text("B"), text("C")],
                vec![text("a1"), None, text("c1")],
                vec![None, None, None],
            ],
        );
        assert_eq!(sheet.rows.len(), 1);
        let row = &sheet.rows[0];
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("C"), Some(&CellValue::from("c1")));
        assert_eq!(row.nth(1), Some(&CellValue::from("c1")));
        assert_eq!(row.get("B"), None);
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
    }
}
