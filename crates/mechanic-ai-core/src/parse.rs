//! Response parsing.
//!
//! The model is asked for bare JSON but often wraps it in code fences or
//! prose. Parsing is optimistic and degrades instead of failing:
//!
//! 1. Remove every ```` ```json ```` and ```` ``` ```` marker, wherever it occurs.
//! 2. Take the span from the first `{` to the last `}` as the payload, or
//!    the whole cleaned text when there is no such span.
//! 3. Parse the payload strictly. Text that is not JSON is shown as raw
//!    text. An object yields its `specs` array; a missing or falsy `specs`
//!    (`null`, `false`, `0`, `""`, `[]`, `{}`) means no records. Valid JSON
//!    of any other shape is a system error.
//!
//! The span in step 2 is greedy: two separate objects in one response are
//! read as a single payload, which then fails to parse and falls back to
//! raw text.

use serde_json::Value;

use crate::models::{Outcome, Query, SpecRecord};

/// Result of reading a raw model response.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// The payload was a JSON object; these are its `specs` elements.
    Records(Vec<SpecRecord>),
    /// The payload was not JSON.
    Unparseable,
    /// The payload was JSON, but not the expected shape.
    Malformed(String),
}

/// Remove all markdown code-fence markers.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "")
}

/// Greedy first-`{`-to-last-`}` span, or the whole text if there is none.
pub fn candidate_payload(cleaned: &str) -> &str {
    match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => cleaned,
    }
}

/// Parse a raw model response into records.
pub fn parse_response(raw: &str) -> Parsed {
    let cleaned = strip_code_fences(raw);
    let payload = candidate_payload(&cleaned);

    let data: Value = match serde_json::from_str(payload) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "model output is not valid JSON");
            return Parsed::Unparseable;
        }
    };

    let mut obj = match data {
        Value::Object(obj) => obj,
        other => {
            return Parsed::Malformed(format!(
                "model returned a JSON {}, expected an object",
                json_kind(&other)
            ))
        }
    };

    match obj.remove("specs") {
        None => Parsed::Records(Vec::new()),
        Some(Value::Array(items)) => {
            Parsed::Records(items.into_iter().map(SpecRecord::new).collect())
        }
        Some(v) if is_falsy(&v) => Parsed::Records(Vec::new()),
        Some(other) => Parsed::Malformed(format!(
            "\"specs\" is a JSON {}, expected an array",
            json_kind(&other)
        )),
    }
}

/// `null`, `false`, zero, and empty strings, arrays or objects.
fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Turn a raw model response for `query` into an [`Outcome`].
///
/// A response that is not JSON is shown verbatim as [`Outcome::RawText`];
/// JSON of the wrong shape is an [`Outcome::Error`].
pub fn interpret(query: &Query, raw: &str) -> Outcome {
    match parse_response(raw) {
        Parsed::Records(rows) if rows.is_empty() => Outcome::Empty {
            query: query.as_str().to_string(),
        },
        Parsed::Records(rows) => Outcome::Table { rows },
        Parsed::Unparseable => Outcome::RawText {
            text: raw.to_string(),
        },
        Parsed::Malformed(message) => Outcome::Error { message },
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
