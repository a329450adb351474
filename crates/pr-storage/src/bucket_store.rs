//! File system storage for buckets

use pr_core::config::{StoreConfig, StoreNamespace};
use pr_core::error::{ReviewError, Result};
use pr_core::record::{to_pretty_json, Record};
use pr_core::session::{BucketStore, Decision};
use pr_core::types::{InputKey, SessionId};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File system based bucket storage
///
/// Each bucket lives in `<dir>/<store_name>.json` and is replaced atomically
/// on every save.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    /// Directory holding the bucket files
    dir: PathBuf,
}

impl FileSystemStore {
    /// Create a store writing into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { dir: dir.into() };
        store.ensure_dir()?;
        Ok(store)
    }

    /// Create a store for a session according to the namespace policy
    pub fn for_session(config: &StoreConfig, input: &Path, session: &SessionId) -> Result<Self> {
        Self::new(Self::resolve_dir(config, input, session))
    }

    /// Directory a store would use, without creating it
    pub fn resolve_dir(config: &StoreConfig, input: &Path, session: &SessionId) -> PathBuf {
        match config.namespace {
            StoreNamespace::Shared => config.output_dir.clone(),
            StoreNamespace::Input => Self::input_dir(&config.output_dir, input),
            StoreNamespace::Session => Self::session_dir(&config.output_dir, session),
        }
    }

    /// Per-input directory under `output_dir`
    pub fn input_dir(output_dir: &Path, input: &Path) -> PathBuf {
        let input = fs::canonicalize(input).unwrap_or_else(|_| input.to_path_buf());
        output_dir.join(InputKey::from_path(&input).as_str())
    }

    /// Per-session directory under `output_dir`
    pub fn session_dir(output_dir: &Path, session: &SessionId) -> PathBuf {
        output_dir.join(session.as_str())
    }

    /// Open an existing store directory for reading
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(ReviewError::FileNotFound(dir));
        }
        Ok(Self { dir })
    }

    /// Ensure the store directory exists
    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                ReviewError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create store directory: {}", e),
                ))
            })?;
            debug!("Created store directory: {:?}", self.dir);
        }
        Ok(())
    }

    /// Get the path for a bucket file
    pub fn bucket_path(&self, decision: Decision) -> PathBuf {
        self.dir.join(decision.file_name())
    }

    /// Get a temporary path for atomic writes
    fn temp_path(&self, decision: Decision) -> PathBuf {
        self.dir.join(format!(".{}.tmp", decision.file_name()))
    }

    /// Write a bucket atomically (write to temp, then rename)
    fn atomic_write(&self, decision: Decision, records: &[Record]) -> Result<()> {
        let temp_path = self.temp_path(decision);
        let final_path = self.bucket_path(decision);
        let json = to_pretty_json(records)?;

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            ReviewError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        fs::rename(&temp_path, &final_path).map_err(|e| {
            // Clean up temp file on failure
            let _ = fs::remove_file(&temp_path);
            ReviewError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!(
            "Saved {} ({} records) to {:?}",
            decision.store_name(),
            records.len(),
            final_path
        );
        Ok(())
    }

    /// Store directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BucketStore for FileSystemStore {
    fn save(&self, decision: Decision, records: &[Record]) -> Result<()> {
        self.ensure_dir()?;
        self.atomic_write(decision, records)
    }

    fn load(&self, decision: Decision) -> Result<Option<Vec<Record>>> {
        let path = self.bucket_path(decision);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let records: Vec<Record> = serde_json::from_str(&content).map_err(|e| {
            ReviewError::from(e).with_context(format!("Corrupt bucket file {}", path.display()))
        })?;
        Ok(Some(records))
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (FileSystemStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    fn record(prompt: &str) -> Record {
        serde_json::from_value(json!({ "prompt": prompt })).unwrap()
    }

    #[test]
    fn test_store_creation() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp_dir.path().join("nested/out")).unwrap();
        assert!(store.dir().exists());
    }

    #[test]
    fn test_bucket_path() {
        let (store, _temp) = create_test_store();
        assert!(store
            .bucket_path(Decision::Keep)
            .ends_with("kept_prompts.json"));
        assert!(store
            .bucket_path(Decision::Skip)
            .ends_with("skipped_prompts.json"));
    }

    #[test]
    fn test_save_and_load() {
        let (store, _temp) = create_test_store();
        let records = vec![record("A"), record("B")];

        store.save(Decision::Discard, &records).unwrap();
        let loaded = store.load(Decision::Discard).unwrap().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_load_missing_bucket() {
        let (store, _temp) = create_test_store();
        assert!(store.load(Decision::Keep).unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites_in_full() {
        let (store, _temp) = create_test_store();
        store
            .save(Decision::Keep, &[record("A"), record("B"), record("C")])
            .unwrap();
        store.save(Decision::Keep, &[record("Z")]).unwrap();

        let loaded = store.load(Decision::Keep).unwrap().unwrap();
        assert_eq!(loaded, vec![record("Z")]);
    }

    #[test]
    fn test_file_format() {
        let (store, _temp) = create_test_store();
        store.save(Decision::Keep, &[record("Ünïcode ✓")]).unwrap();

        let content = fs::read_to_string(store.bucket_path(Decision::Keep)).unwrap();
        assert_eq!(content, "[\n  {\n    \"prompt\": \"Ünïcode ✓\"\n  }\n]");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let (store, _temp) = create_test_store();
        store.save(Decision::Skip, &[record("A")]).unwrap();

        assert!(!store.temp_path(Decision::Skip).exists());
        assert!(store.bucket_path(Decision::Skip).exists());
    }

    #[test]
    fn test_corrupt_bucket_file() {
        let (store, _temp) = create_test_store();
        fs::write(store.bucket_path(Decision::Keep), "{not json").unwrap();

        let err = store.load(Decision::Keep).unwrap_err();
        assert!(err.to_string().contains("Corrupt bucket file"));
    }

    #[test]
    fn test_open_missing_directory() {
        let result = FileSystemStore::open("/nonexistent/prompt-reviewer-store");
        assert!(matches!(result, Err(ReviewError::FileNotFound(_))));
    }

    #[test]
    fn test_namespace_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("prompts.json");
        fs::write(&input, "[]").unwrap();
        let session = SessionId::generate();

        let mut config = StoreConfig {
            output_dir: temp_dir.path().join("out"),
            namespace: StoreNamespace::Shared,
        };
        assert_eq!(
            FileSystemStore::resolve_dir(&config, &input, &session),
            temp_dir.path().join("out")
        );

        config.namespace = StoreNamespace::Session;
        assert_eq!(
            FileSystemStore::resolve_dir(&config, &input, &session),
            temp_dir.path().join("out").join(session.as_str())
        );

        config.namespace = StoreNamespace::Input;
        let dir = FileSystemStore::resolve_dir(&config, &input, &session);
        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("prompts-"));
        // Same input resolves to the same directory across sessions
        assert_eq!(
            dir,
            FileSystemStore::resolve_dir(&config, &input, &SessionId::generate())
        );
    }

    #[test]
    fn test_for_session_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            output_dir: temp_dir.path().to_path_buf(),
            namespace: StoreNamespace::Session,
        };
        let session = SessionId::generate();
        let store =
            FileSystemStore::for_session(&config, Path::new("input.json"), &session).unwrap();
        assert!(store.dir().ends_with(session.as_str()));
        assert!(store.dir().is_dir());
    }
}
