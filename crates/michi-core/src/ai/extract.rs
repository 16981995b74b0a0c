//! Pull the JSON payload out of free-form model text.

use serde_json::Value;

use crate::error::{PlannerError, Result};

const FENCE: &str = "```";

/// Parse the JSON value a model response carries.
///
/// Accepts, in order: the whole text as JSON, the contents of the first
/// fenced code block (with or without a language tag), and finally the span
/// from the first `{` to the last `}`.
///
/// # Errors
///
/// Returns `PlannerError::SchemaMismatch` at path `$` when no candidate
/// parses.
pub fn extract_json(text: &str) -> Result<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::schema("$", "model response was empty"));
    }

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    if let Some(fenced) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str(fenced) {
            return Ok(value);
        }
    }

    if let (Some(open), Some(close)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if open < close {
            if let Ok(value) = serde_json::from_str(&trimmed[open..=close]) {
                return Ok(value);
            }
        }
    }

    Err(PlannerError::schema(
        "$",
        "model response did not contain a parseable JSON object",
    ))
}

/// Body of the first fenced code block, without its language tag.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find(FENCE)? + FENCE.len();
    let rest = &text[start..];
    // Skip an info string such as `json` up to the end of the fence line.
    let body_start = rest.find('\n').map_or(0, |newline| newline + 1);
    let body = &rest[body_start..];
    let end = body.find(FENCE).unwrap_or(body.len());
    Some(body[..end].trim())
}
