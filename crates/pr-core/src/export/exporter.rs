//! Exporter trait and manager

use crate::error::{ReviewError, Result};
use crate::session::Buckets;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Trait for bucket exporters
pub trait Exporter: Send + Sync {
    /// Export the buckets to bytes
    fn export(&self, buckets: &Buckets) -> Result<Vec<u8>>;

    /// Get the format name
    fn format_name(&self) -> &str;

    /// Get the file extension
    fn file_extension(&self) -> &str;
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        let mut manager = Self {
            exporters: HashMap::new(),
        };

        manager.register(Box::new(super::archive::ArchiveExporter::new()));
        manager.register(Box::new(super::json::JsonExporter::new()));

        manager
    }

    /// Register a new exporter
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters
            .insert(exporter.format_name().to_string(), exporter);
    }

    /// Export the buckets in the specified format
    pub fn export(&self, buckets: &Buckets, format: &str) -> Result<Vec<u8>> {
        self.get_or_err(format)?.export(buckets)
    }

    /// Export the buckets to a file, returning the path written
    pub fn export_to_file(&self, buckets: &Buckets, format: &str, path: &Path) -> Result<PathBuf> {
        let exporter = self.get_or_err(format)?;
        let content = exporter.export(buckets)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Add extension if needed
        let final_path = if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(exporter.file_extension())
        };

        // Atomic write using temp file
        let temp_path = final_path.with_extension("tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(&content)?;
            file.flush()?;
        }

        fs::rename(&temp_path, &final_path)?;
        info!(
            "Exported {} records as {} to {:?}",
            buckets.total(),
            format,
            final_path
        );
        Ok(final_path)
    }

    /// Get list of available format names
    pub fn available_formats(&self) -> Vec<String> {
        let mut formats: Vec<_> = self.exporters.keys().cloned().collect();
        formats.sort();
        formats
    }

    /// Check if a format is available
    pub fn has_format(&self, format: &str) -> bool {
        self.exporters.contains_key(format)
    }

    /// Get an exporter by format name
    pub fn get(&self, format: &str) -> Option<&dyn Exporter> {
        self.exporters.get(format).map(|e| e.as_ref())
    }

    fn get_or_err(&self, format: &str) -> Result<&dyn Exporter> {
        self.get(format).ok_or_else(|| {
            ReviewError::Validation(format!(
                "Unknown export format: {} (available: {})",
                format,
                self.available_formats().join(", ")
            ))
        })
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::json;
    use tempfile::TempDir;

    struct TestExporter;

    impl Exporter for TestExporter {
        fn export(&self, buckets: &Buckets) -> Result<Vec<u8>> {
            Ok(format!("{} records", buckets.total()).into_bytes())
        }

        fn format_name(&self) -> &str {
            "test"
        }

        fn file_extension(&self) -> &str {
            "txt"
        }
    }

    fn sample_buckets() -> Buckets {
        let record: Record = serde_json::from_value(json!({"prompt": "A"})).unwrap();
        Buckets {
            kept: vec![record],
            ..Default::default()
        }
    }

    #[test]
    fn test_export_manager_creation() {
        let manager = ExportManager::new();
        assert!(manager.has_format("zip"));
        assert!(manager.has_format("json"));
        assert_eq!(manager.available_formats(), vec!["json", "zip"]);
    }

    #[test]
    fn test_register_exporter() {
        let mut manager = ExportManager::new();
        manager.register(Box::new(TestExporter));
        assert!(manager.has_format("test"));
        let bytes = manager.export(&sample_buckets(), "test").unwrap();
        assert_eq!(bytes, b"1 records");
    }

    #[test]
    fn test_export_unknown_format() {
        let manager = ExportManager::new();
        let err = manager.export(&Buckets::new(), "tar").unwrap_err();
        assert!(err.to_string().contains("Unknown export format: tar"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = TempDir::new().unwrap();
        let manager = ExportManager::new();
        let buckets = sample_buckets();

        let path = manager
            .export_to_file(&buckets, "zip", &dir.path().join("out/prompt_reviews.zip"))
            .unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(
            fs::read(&path).unwrap(),
            manager.export(&buckets, "zip").unwrap()
        );
    }

    #[test]
    fn test_export_to_file_adds_extension() {
        let dir = TempDir::new().unwrap();
        let manager = ExportManager::new();

        let path = manager
            .export_to_file(&Buckets::new(), "json", &dir.path().join("reviews"))
            .unwrap();
        assert_eq!(path.extension().unwrap(), "json");
    }
}
