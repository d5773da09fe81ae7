//! Tool call errors.
//!
//! Every variant's `Display` is the message a caller sees in the error
//! envelope, so each one names what to fix.

use relay_core::functions::FunctionsError;
use relay_core::providers::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Functions(#[from] FunctionsError),

    #[error("Tool call cancelled")]
    Cancelled,

    #[error("Failed to serialise tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    pub fn invalid_arguments(tool: &str, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.to_string(),
            message: message.into(),
        }
    }
}
