//! Response envelope builder.
//!
//! The single place where tool outcomes become `CallToolResult`s: one text
//! content block holding pretty-printed JSON, with `isError` set exactly
//! when the handler failed.

use rmcp::model::{CallToolResult, Content};
use serde_json::{Value, json};

use crate::error::ToolError;

/// Wrap a handler's return value.
pub fn success(value: &Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(pretty(value))])
}

/// Wrap an error message as `{"error": message}`.
pub fn failure(message: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(pretty(&json!({ "error": message })))])
}

/// Wrap either outcome.
pub fn from_outcome(outcome: Result<Value, ToolError>) -> CallToolResult {
    match outcome {
        Ok(value) => success(&value),
        Err(e) => failure(&e.to_string()),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn text(result: &CallToolResult) -> &str {
        assert_eq!(result.content.len(), 1, "exactly one content block");
        match &result.content[0].raw {
            RawContent::Text(t) => &t.text,
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn success_is_pretty_json_and_not_error() {
        let result = success(&json!({"content": "4", "model": "gpt-4o"}));
        assert_eq!(result.is_error, Some(false));
        let body = text(&result);
        assert!(body.contains('\n'), "pretty printed");
        let parsed: Value = serde_json::from_str(body).expect("json");
        assert_eq!(parsed["content"], "4");
    }

    #[test]
    fn failure_wraps_message() {
        let result = failure("OPENAI_API_KEY not set");
        assert_eq!(result.is_error, Some(true));
        let parsed: Value = serde_json::from_str(text(&result)).expect("json");
        assert_eq!(parsed, json!({"error": "OPENAI_API_KEY not set"}));
    }

    #[test]
    fn outcome_error_uses_display() {
        let result = from_outcome(Err(ToolError::UnknownTool("delete_everything".into())));
        assert_eq!(result.is_error, Some(true));
        let parsed: Value = serde_json::from_str(text(&result)).expect("json");
        assert_eq!(parsed["error"], "Unknown tool: delete_everything");
    }
}
