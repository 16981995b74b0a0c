//! Error handling utilities for MCP server

use michi_core::PlannerError;
use rmcp::ErrorData;

/// Convert a planner error to an MCP error.
///
/// The JSON error body (`{"error": ..., "details": [...]}`) travels as the
/// error data, so a client sees every schema violation, not just a count.
/// Caller mistakes map to `invalid_params`; the rest are internal errors.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let data = serde_json::to_value(error.to_body()).ok();
    let text = format!("{message}: {error}");
    match error.status_code() {
        400 | 404 => ErrorData::invalid_params(text, data),
        _ => ErrorData::internal_error(text, data),
    }
}
