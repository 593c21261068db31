pub mod kv_file;
pub mod mongo;
pub mod workbook;

pub use kv_file::JsonFileStore;
pub use mongo::MongoCatalogStore;
pub use workbook::CalamineWorkbookLoader;
