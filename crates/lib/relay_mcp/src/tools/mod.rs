//! Tool sets served by the Relay MCP servers.

pub mod multimodel;
pub mod serverless;
pub mod types;

use async_trait::async_trait;
use rmcp::model::{JsonObject, Tool};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ToolError;

/// A fixed catalog of tools plus the handlers behind them.
///
/// `dispatch` is only called with names present in `catalog`; it parses the
/// arguments into a typed request and runs the matching handler.
#[async_trait]
pub trait ToolSet: Send + Sync + 'static {
    /// Short server name for logs.
    fn name(&self) -> &'static str;

    /// Instructions advertised to the client at initialization.
    fn instructions(&self) -> &'static str;

    /// Every tool this set exposes. Must be the same on every call.
    fn catalog(&self) -> Vec<Tool>;

    /// Run the named tool.
    async fn dispatch(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<serde_json::Value, ToolError>;
}

/// Parse a call into an adjacently tagged request enum.
///
/// `C` is tagged with `name` and carries its arguments under `arguments`.
/// Names are checked against the catalog before this runs, so every failure
/// here is reported against the arguments.
pub(crate) fn parse_call<C: DeserializeOwned>(
    name: &str,
    arguments: JsonObject,
) -> Result<C, ToolError> {
    let tagged = serde_json::json!({ "name": name, "arguments": arguments });
    serde_json::from_value(tagged).map_err(|e| ToolError::invalid_arguments(name, e.to_string()))
}

/// Serialize a handler result for the envelope.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, ToolError> {
    Ok(serde_json::to_value(value)?)
}

/// Reject blank required text arguments before any outbound call.
pub(crate) fn require_text(tool: &str, field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(
            tool,
            format!("{field} must not be empty"),
        ));
    }
    Ok(())
}
