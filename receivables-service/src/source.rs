use crate::error::{ReceivablesError, ReceivablesResult};
use crate::models::LedgerSnapshot;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Supplier of the documents a report is computed from
pub trait LedgerSource {
    /// Load a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Fails when the underlying data cannot be read or decoded.
    fn load(&self) -> ReceivablesResult<LedgerSnapshot>;

    /// Human readable origin, used in logs and errors
    fn describe(&self) -> String;
}

/// Snapshot held in memory, for tests and embedding callers
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerSource {
    snapshot: LedgerSnapshot,
}

impl InMemoryLedgerSource {
    pub fn new(snapshot: LedgerSnapshot) -> Self {
        Self { snapshot }
    }
}

impl LedgerSource for InMemoryLedgerSource {
    fn load(&self) -> ReceivablesResult<LedgerSnapshot> {
        Ok(self.snapshot.clone())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

/// JSON document with the snapshot collections as top level keys
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerSource for JsonFileSource {
    fn load(&self) -> ReceivablesResult<LedgerSnapshot> {
        let file = File::open(&self.path).map_err(|e| ReceivablesError::Read {
            source_name: self.describe(),
            message: e.to_string(),
        })?;
        read_snapshot(BufReader::new(file), &self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Decode a snapshot from JSON.
///
/// # Errors
///
/// Returns [`ReceivablesError::Decode`] naming `source_name` on malformed JSON.
pub fn read_snapshot<R: Read>(reader: R, source_name: &str) -> ReceivablesResult<LedgerSnapshot> {
    serde_json::from_reader(reader).map_err(|e| ReceivablesError::Decode {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}
