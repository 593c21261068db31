pub mod cart;
pub mod domain;
pub mod import;
pub mod memory;
pub mod ports;
pub mod workbook;

pub use cart::{CartEngine, CART_STORAGE_KEY};
pub use domain::{
    BatchOutcome, CartLineItem, CartSummary, CatalogCollection, CollectionReport,
    ExamCertRecord, ExamCourseRecord, ExamQARecord, ImportSummary, InsertFailure, ItemType,
};
pub use import::{CatalogImporter, ImportError};
pub use memory::MemoryStore;
pub use ports::{CatalogStore, KeyValueStore, PortError, PortResult, WorkbookLoader};
pub use workbook::{CellValue, SheetRow, Workbook, Worksheet};
