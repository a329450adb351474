//! Core type definitions for prompt-reviewer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

/// Unique identifier for a review session
/// Format: YYYYMMDDHHMMSS-<short_uuid>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new SessionId
    pub fn generate() -> Self {
        let now = chrono::Utc::now();
        let uuid = Uuid::new_v4();
        let short_uuid = &uuid.to_string()[..8];
        SessionId(format!("{}-{}", now.format("%Y%m%d%H%M%S"), short_uuid))
    }

    /// Create from a string with validation
    pub fn from_string(s: impl Into<String>) -> crate::Result<Self> {
        let s = s.into();
        if Self::validate(&s) {
            Ok(SessionId(s))
        } else {
            Err(crate::ReviewError::Validation(format!(
                "Invalid session ID format: {}",
                s
            )))
        }
    }

    fn validate(s: &str) -> bool {
        match s.split_once('-') {
            Some((stamp, suffix)) => {
                stamp.len() == 14
                    && stamp.chars().all(|c| c.is_ascii_digit())
                    && suffix.len() == 8
                    && suffix.chars().all(|c| c.is_ascii_hexdigit())
            }
            None => false,
        }
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable key for an input file, used to namespace bucket stores per input
/// Format: <file-stem>-<first 8 hex chars of blake3(path)>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputKey(pub String);

impl InputKey {
    /// Derive the key from an input path
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(sanitize_stem)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "input".to_string());
        let hash = blake3::hash(path.to_string_lossy().as_bytes());
        InputKey(format!("{}-{}", stem, &hash.to_hex()[..8]))
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn sanitize_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_session_id_generate() {
        let id = SessionId::generate();
        assert_eq!(id.as_str().len(), 23);
        assert!(SessionId::from_string(id.as_str()).is_ok());
    }

    #[test]
    fn test_session_id_validation() {
        assert!(SessionId::from_string("20260101120000-abcdef01").is_ok());
        assert!(SessionId::from_string("2026-abcdef01").is_err());
        assert!(SessionId::from_string("20260101120000").is_err());
        assert!(SessionId::from_string("20260101120000-zzzzzzzz").is_err());
    }

    #[test]
    fn test_input_key_is_stable() {
        let path = PathBuf::from("/data/prompts.json");
        assert_eq!(InputKey::from_path(&path), InputKey::from_path(&path));
        assert!(InputKey::from_path(&path).as_str().starts_with("prompts-"));
    }

    #[test]
    fn test_input_key_differs_by_directory() {
        let a = InputKey::from_path(&PathBuf::from("/a/prompts.json"));
        let b = InputKey::from_path(&PathBuf::from("/b/prompts.json"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_input_key_sanitizes_stem() {
        let key = InputKey::from_path(&PathBuf::from("my prompts (v2).json"));
        assert!(key.as_str().starts_with("my_prompts__v2_-"));
    }
}
