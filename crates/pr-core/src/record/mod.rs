//! Review records
//!
//! A record is an opaque JSON object supplied by the input document. The
//! reviewer only reads two keys from it:
//! - `prompt`: the text shown to the operator
//! - `previewUrl`: an optional reference to a preview image
//!
//! Every other field is carried through untouched, in input order, so bucket
//! files reproduce the input objects exactly.

mod loader;

pub use loader::{load_records, parse_records, RecordSource};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Text shown when a record has no prompt
pub const DEFAULT_PROMPT: &str = "No prompt found";

/// Key holding the prompt text
pub const PROMPT_KEY: &str = "prompt";

/// Key holding the preview reference
pub const PREVIEW_URL_KEY: &str = "previewUrl";

/// A single reviewable record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create a record from a JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        Record(map)
    }

    /// Prompt text, falling back to [`DEFAULT_PROMPT`]
    pub fn prompt(&self) -> Cow<'_, str> {
        match self.0.get(PROMPT_KEY) {
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            None | Some(Value::Null) => Cow::Borrowed(DEFAULT_PROMPT),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    /// Whether the record carries a prompt at all
    pub fn has_prompt(&self) -> bool {
        !matches!(self.0.get(PROMPT_KEY), None | Some(Value::Null))
    }

    /// Preview reference, if present and non-empty
    pub fn preview_url(&self) -> Option<&str> {
        self.0
            .get(PREVIEW_URL_KEY)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Get a raw field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Access the underlying object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Pretty-printed JSON of this record alone
    pub fn to_pretty_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record(map)
    }
}

/// Serialize a bucket the way every store and export writes it:
/// pretty-printed with two-space indent, non-ASCII kept literal.
pub fn to_pretty_json(records: &[Record]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
