//! Voyage embedding provider.
//!
//! Calls the Voyage embeddings API (`/v1/embeddings`) with a single input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::client::ProviderClient;
use super::models::ModelSpec;
use super::{Embedding, ProviderError};

const EMBEDDINGS_PATH: &str = "/v1/embeddings";

/// How the provider should treat the embedded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Document,
    Query,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: [&'a str; 1],
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_type: Option<InputType>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
    usage: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f64>,
}

/// Embed one text.
pub async fn embed(
    client: &ProviderClient,
    model: ModelSpec,
    text: &str,
    input_type: Option<InputType>,
) -> Result<Embedding, ProviderError> {
    let resp: EmbeddingResponse = client
        .post_json(
            EMBEDDINGS_PATH,
            &EmbeddingRequest {
                input: [text],
                model: model.id,
                input_type,
            },
        )
        .await?;
    embedding(resp, model)
}

fn embedding(resp: EmbeddingResponse, model: ModelSpec) -> Result<Embedding, ProviderError> {
    let vector = resp
        .data
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse {
            provider: "Voyage",
            message: "empty data array".to_string(),
        })?
        .embedding;

    Ok(Embedding {
        dimensions: vector.len(),
        embedding: vector,
        model: model.id.to_string(),
        usage: resp.usage,
    })
}
