//! services/storefront/src/adapters/kv_file.rs
//!
//! A `KeyValueStore` persisted as one JSON object on disk, so a cart survives
//! between runs of the command-line front end.

use ce_storefront_core::ports::{KeyValueStore, PortError, PortResult};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every entry; a missing or unreadable file counts as empty.
    fn read_entries(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return BTreeMap::new(),
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            debug!("Ignoring unreadable store {}: {}", self.path.display(), e);
            BTreeMap::new()
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value.to_string());
        let serialized = serde_json::to_string_pretty(&entries)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Write beside the target and rename so readers never see half a file.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PortError::Unexpected(e.to_string()))?;
        tmp.write_all(serialized.as_bytes())
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}
