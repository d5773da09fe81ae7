//! Parameter and result types for the Relay tools.
//!
//! Request structs double as the input schema source for the catalog.

use relay_core::functions::DiscoveredFunction;
use relay_core::providers::voyage::InputType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    default_gemini_model, default_openai_model, default_voyage_model, gemini_model_schema,
    openai_model_schema, voyage_model_schema,
};

/// Parameters for the `query_openai` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryOpenAiRequest {
    /// The prompt to send to the model.
    pub prompt: String,
    /// Optional system prompt.
    pub system_prompt: Option<String>,
    #[schemars(default = "default_openai_model", schema_with = "openai_model_schema")]
    pub model: Option<String>,
}

/// Parameters for the `query_gemini` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryGeminiRequest {
    /// The prompt to send to the model.
    pub prompt: String,
    /// Optional system instruction.
    pub system_prompt: Option<String>,
    #[schemars(default = "default_gemini_model", schema_with = "gemini_model_schema")]
    pub model: Option<String>,
}

/// Parameters for the `embed_voyage` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct EmbedVoyageRequest {
    /// Text to embed.
    pub text: String,
    /// `document` for content being indexed, `query` for search queries.
    pub input_type: Option<InputType>,
    #[schemars(default = "default_voyage_model", schema_with = "voyage_model_schema")]
    pub model: Option<String>,
}

/// Parameters for the `parallel_query` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ParallelQueryRequest {
    /// The prompt sent to both providers.
    pub prompt: String,
    /// Optional system prompt sent to both providers.
    pub system_prompt: Option<String>,
    #[schemars(default = "default_openai_model", schema_with = "openai_model_schema")]
    pub openai_model: Option<String>,
    #[schemars(default = "default_gemini_model", schema_with = "gemini_model_schema")]
    pub gemini_model: Option<String>,
}

/// Parameters for the `discover` tool (none).
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct DiscoverRequest {}

/// Parameters for the `invoke` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct InvokeRequest {
    /// Function name (directory name under the functions root).
    pub name: String,
    /// JSON object sent as the request body. Defaults to `{}`.
    pub payload: Option<serde_json::Map<String, serde_json::Value>>,
    /// Full URL to POST to instead of the computed endpoint.
    pub endpoint: Option<String>,
}

/// One side of a fan-out: its result, or the error it failed with.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BranchOutcome<T> {
    Ok(T),
    Err { error: String },
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for BranchOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::Err {
                error: e.to_string(),
            },
        }
    }
}

/// Result of `parallel_query`, keyed by provider.
#[derive(Debug, Serialize)]
pub struct ParallelQueryResult<T> {
    pub openai: BranchOutcome<T>,
    pub gemini: BranchOutcome<T>,
}

/// Result of `discover`.
#[derive(Debug, Serialize)]
pub struct DiscoverResult {
    pub functions: Vec<DiscoveredFunction>,
    pub count: usize,
}

/// Result of `invoke`.
#[derive(Debug, Serialize)]
pub struct InvokeResult {
    pub function: String,
    pub service: String,
    pub result: serde_json::Value,
    pub status: u16,
}

/// Property names advertised by a schema, sorted. Used by catalog tests.
#[cfg(test)]
pub(crate) fn property_names(schema: &rmcp::model::JsonObject) -> Vec<String> {
    schema
        .get("properties")
        .and_then(|p| p.as_object())
        .map(|p| {
            let mut names: Vec<String> = p.keys().cloned().collect();
            names.sort();
            names
        })
        .unwrap_or_default()
}
