//! ZIP archive exporter

use super::exporter::Exporter;
use crate::error::Result;
use crate::record::to_pretty_json;
use crate::session::{Buckets, Decision};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Default file name of the exported archive
pub const DEFAULT_ARCHIVE_NAME: &str = "prompt_reviews.zip";

/// Builds a ZIP archive with one JSON entry per bucket
#[derive(Debug, Default)]
pub struct ArchiveExporter;

impl ArchiveExporter {
    /// Create a new archive exporter
    pub fn new() -> Self {
        Self
    }

    fn entry_options() -> SimpleFileOptions {
        // Fixed timestamp keeps repeated exports byte-identical
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
    }
}

impl Exporter for ArchiveExporter {
    fn export(&self, buckets: &Buckets) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for decision in Decision::ALL {
            let json = to_pretty_json(buckets.get(decision))?;
            zip.start_file(decision.file_name(), Self::entry_options())?;
            zip.write_all(json.as_bytes())?;
        }

        Ok(zip.finish()?.into_inner())
    }

    fn format_name(&self) -> &str {
        "zip"
    }

    fn file_extension(&self) -> &str {
        "zip"
    }
}
