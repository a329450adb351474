//! Bucket store trait and abstractions

use super::model::Decision;
use crate::error::{ReviewError, Result};
use crate::record::Record;

/// Durable mirror of the three buckets.
///
/// Every save replaces the whole bucket; stores never append.
pub trait BucketStore: Send + Sync {
    /// Replace the stored contents of one bucket
    fn save(&self, decision: Decision, records: &[Record]) -> Result<()>;

    /// Read a stored bucket, `None` if it was never written
    fn load(&self, decision: Decision) -> Result<Option<Vec<Record>>>;

    /// Human-readable location of the store
    fn location(&self) -> String;

    /// Replace all three buckets
    fn save_all(&self, buckets: &super::Buckets) -> Result<()> {
        for decision in Decision::ALL {
            self.save(decision, buckets.get(decision))?;
        }
        Ok(())
    }
}

/// In-memory store, used for dry runs and tests
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// In-memory bucket store
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        buckets: RwLock<HashMap<Decision, Vec<Record>>>,
        writes: RwLock<usize>,
    }

    impl MemoryStore {
        /// Create an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of save calls so far
        pub fn write_count(&self) -> usize {
            self.writes.read().map(|w| *w).unwrap_or(0)
        }
    }

    fn poisoned(decision: Decision) -> ReviewError {
        ReviewError::Io(std::io::Error::other(format!(
            "memory store lock poisoned while accessing {}",
            decision.store_name()
        )))
    }

    impl BucketStore for MemoryStore {
        fn save(&self, decision: Decision, records: &[Record]) -> Result<()> {
            self.buckets
                .write()
                .map_err(|_| poisoned(decision))?
                .insert(decision, records.to_vec());
            if let Ok(mut writes) = self.writes.write() {
                *writes += 1;
            }
            Ok(())
        }

        fn load(&self, decision: Decision) -> Result<Option<Vec<Record>>> {
            let buckets = self.buckets.read().map_err(|_| poisoned(decision))?;
            Ok(buckets.get(&decision).cloned())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::session::Buckets;
        use serde_json::json;

        fn record(prompt: &str) -> Record {
            serde_json::from_value(json!({ "prompt": prompt })).unwrap()
        }

        #[test]
        fn test_memory_store_save_load() {
            let store = MemoryStore::new();
            assert!(store.load(Decision::Keep).unwrap().is_none());

            store.save(Decision::Keep, &[record("A")]).unwrap();
            let loaded = store.load(Decision::Keep).unwrap().unwrap();
            assert_eq!(loaded, vec![record("A")]);
            assert!(store.load(Decision::Skip).unwrap().is_none());
        }

        #[test]
        fn test_memory_store_reports_poisoned_lock() {
            let store = std::sync::Arc::new(MemoryStore::new());
            let held = store.clone();
            let _ = std::thread::spawn(move || {
                let _guard = held.buckets.write().unwrap();
                panic!("writer died");
            })
            .join();

            let err = store.save(Decision::Keep, &[record("A")]).unwrap_err();
            assert!(err.to_string().contains("kept_prompts"));
            assert!(store.load(Decision::Keep).is_err());
            assert_eq!(store.write_count(), 0);
        }

        #[test]
        fn test_memory_store_overwrites() {
            let store = MemoryStore::new();
            store.save(Decision::Skip, &[record("A"), record("B")]).unwrap();
            store.save(Decision::Skip, &[record("C")]).unwrap();

            let loaded = store.load(Decision::Skip).unwrap().unwrap();
            assert_eq!(loaded, vec![record("C")]);
            assert_eq!(store.write_count(), 2);
        }

        #[test]
        fn test_save_all() {
            let store = MemoryStore::new();
            let buckets = Buckets {
                kept: vec![record("A")],
                ..Default::default()
            };
            store.save_all(&buckets).unwrap();

            assert_eq!(store.write_count(), 3);
            assert_eq!(store.load(Decision::Discard).unwrap(), Some(Vec::new()));
        }
    }
}
