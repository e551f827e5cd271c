//! Lenient reading of oracle replies.
//!
//! The untyped boundary stays thin: [`extract_object`] is the single place
//! that decides whether a reply is structured data at all, and the helpers
//! below read individual fields without ever failing.

use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{Error, Result};

/// Recover the JSON object carried by an oracle reply.
///
/// Accepts a bare object, an object wrapped in a markdown code fence, or an
/// object embedded in surrounding prose. Anything else is an
/// [`Error::OracleUnparseable`].
pub fn extract_object(content: &str, stage: &'static str) -> Result<Map<String, Value>> {
    let body = strip_code_fence(content.trim());

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => return Ok(map),
        Ok(other) => {
            debug!(stage, kind = value_kind(&other), "oracle reply is JSON but not an object");
        }
        Err(e) => {
            debug!(stage, error = %e, "oracle reply is not bare JSON, trying embedded object");
        }
    }

    let embedded = outermost_braces(body)
        .ok_or_else(|| Error::unparseable(stage, "no JSON object found in oracle reply", content))?;

    match serde_json::from_str::<Value>(embedded) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::unparseable(
            stage,
            format!("expected a JSON object, found {}", value_kind(&other)),
            content,
        )),
        Err(e) => Err(Error::unparseable(stage, e.to_string(), content)),
    }
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Drop the info string ("json", "JSON", ...) on the opening fence line
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn outermost_braces(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read a text field; non-strings become empty
pub fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

/// Read a list of strings, keeping only non-empty string entries.
///
/// A single string is accepted as a one-element list.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Borrow a nested object; anything else reads as empty
pub fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}
