//! Combined JSON exporter

use super::exporter::Exporter;
use crate::error::Result;
use crate::record::Record;
use crate::session::Buckets;
use serde::{Deserialize, Serialize};

/// All three buckets in one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedExport {
    pub kept: Vec<Record>,
    pub discarded: Vec<Record>,
    pub skipped: Vec<Record>,
}

impl From<&Buckets> for CombinedExport {
    fn from(buckets: &Buckets) -> Self {
        Self {
            kept: buckets.kept.clone(),
            discarded: buckets.discarded.clone(),
            skipped: buckets.skipped.clone(),
        }
    }
}

/// Pretty-printed single-document exporter
#[derive(Debug, Default)]
pub struct JsonExporter;

impl JsonExporter {
    /// Create a new JSON exporter
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for JsonExporter {
    fn export(&self, buckets: &Buckets) -> Result<Vec<u8>> {
        let data = CombinedExport::from(buckets);
        Ok(serde_json::to_vec_pretty(&data)?)
    }

    fn format_name(&self) -> &str {
        "json"
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
