//! Data model shared by the pipeline and its callers.
//!
//! - [`Query`]: validated, non-empty question text.
//! - [`SpecRecord`]: one extracted row, kept as the model emitted it.
//! - [`Outcome`]: the four mutually exclusive results of a submission.
//! - [`Chunk`]: a piece of source text produced when building an index.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors raised before the pipeline is allowed to run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Please enter a query.")]
    Empty,
}

/// A question about the corpus.
///
/// Holds the text exactly as typed. Construction rejects text that is empty
/// or contains only whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(text: impl Into<String>) -> Result<Self, QueryError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Names of the four fields the extraction prompt asks for, in display order.
pub const SPEC_FIELDS: [&str; 4] = ["component", "spec_type", "value", "unit"];

/// One element of the model's `specs` array.
///
/// Wraps the raw JSON value so that missing fields, wrong types and extra
/// keys pass through untouched. Use the accessors to read the standard
/// fields when they are strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecRecord(Value);

impl SpecRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Look up a field by name. Returns `None` for non-object records.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|obj| obj.get(name))
    }

    fn string_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn component(&self) -> Option<&str> {
        self.string_field("component")
    }

    pub fn spec_type(&self) -> Option<&str> {
        self.string_field("spec_type")
    }

    pub fn value(&self) -> Option<&str> {
        self.string_field("value")
    }

    /// The unit, or `None` when it is null, missing, or not a string.
    pub fn unit(&self) -> Option<&str> {
        self.string_field("unit")
    }

    /// Keys of this record that are not one of [`SPEC_FIELDS`], in order.
    pub fn extra_keys(&self) -> Vec<&str> {
        match self.0.as_object() {
            Some(obj) => obj
                .keys()
                .map(String::as_str)
                .filter(|k| !SPEC_FIELDS.contains(k))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// The result of submitting one query.
///
/// Exactly one variant is produced per submission. Serializes with a `kind`
/// tag: `table`, `empty`, `raw_text`, or `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The model returned at least one record.
    Table { rows: Vec<SpecRecord> },
    /// The model returned valid JSON with no records.
    Empty { query: String },
    /// The model's output could not be read as the expected JSON.
    RawText { text: String },
    /// Retrieval, generation, or an internal fault failed.
    Error { message: String },
}

impl Outcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Table { .. } => "table",
            Outcome::Empty { .. } => "empty",
            Outcome::RawText { .. } => "raw_text",
            Outcome::Error { .. } => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }
}

/// A chunk of a source file, ready to be embedded into an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Stable identifier derived from the source and chunk index.
    pub id: String,
    /// Source the chunk was cut from (usually a relative file path).
    pub source: String,
    /// Zero-based position within the source.
    pub chunk_index: i64,
    pub text: String,
}
