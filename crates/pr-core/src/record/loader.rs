//! Input loading
//!
//! The input document is a JSON array of objects. It is parsed exactly once
//! per session; [`RecordSource`] holds the parsed result and hands out the
//! same slice on every later read.

use super::Record;
use crate::error::{ReviewError, Result};
use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parse an input document into records
pub fn parse_records(content: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(content)
        .map_err(|e| ReviewError::Load(format!("expected a JSON array of objects ({})", e)))?;

    if records.is_empty() {
        return Err(ReviewError::Load("input contains no records".to_string()));
    }

    Ok(records)
}

/// Read and parse an input file
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReviewError::FileNotFound(path.to_path_buf())
        } else {
            ReviewError::Load(format!("cannot read {}: {}", path.display(), e))
        }
    })?;

    let records = parse_records(&content)
        .map_err(|e| e.with_context(format!("Invalid input file {}", path.display())))?;
    debug!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Load-once guard over an input file
#[derive(Debug)]
pub struct RecordSource {
    path: PathBuf,
    records: OnceCell<Vec<Record>>,
}

impl RecordSource {
    /// Create a source for the given path; nothing is read yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: OnceCell::new(),
        }
    }

    /// Create a source that is already loaded
    pub fn from_records(path: impl Into<PathBuf>, records: Vec<Record>) -> Self {
        let source = Self::new(path);
        let _ = source.records.set(records);
        source
    }

    /// Path of the input file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the input has been parsed
    pub fn is_loaded(&self) -> bool {
        self.records.get().is_some()
    }

    /// Records of the input, parsing the file on first access only
    pub fn records(&self) -> Result<&[Record]> {
        if let Some(records) = self.records.get() {
            return Ok(records);
        }

        let loaded = load_records(&self.path)?;
        Ok(self.records.get_or_init(|| loaded))
    }

    /// Number of records (loads on first access)
    pub fn len(&self) -> Result<usize> {
        Ok(self.records()?.len())
    }

    /// Take ownership of the parsed records
    pub fn into_records(self) -> Result<Vec<Record>> {
        match self.records.into_inner() {
            Some(records) => Ok(records),
            None => load_records(&self.path),
        }
    }
}
