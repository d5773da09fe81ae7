//! Gemini text generation via `generateContent`.

use serde::{Deserialize, Serialize};

use super::client::ProviderClient;
use super::models::ModelSpec;
use super::{Completion, ProviderError};

const PROVIDER: &str = "Gemini";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Generate text with a Gemini model.
pub async fn complete(
    client: &ProviderClient,
    model: ModelSpec,
    prompt: &str,
    system_prompt: Option<&str>,
) -> Result<Completion, ProviderError> {
    let request = GenerateRequest {
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: prompt }],
        }],
        system_instruction: system_prompt.map(|text| Content {
            role: None,
            parts: vec![Part { text }],
        }),
    };

    let path = format!("/v1beta/models/{}:generateContent", model.id);
    let resp: GenerateResponse = client.post_json(&path, &request).await?;
    completion(resp, model)
}

fn completion(resp: GenerateResponse, model: ModelSpec) -> Result<Completion, ProviderError> {
    let candidate = resp
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse {
            provider: PROVIDER,
            message: "no candidates returned".to_string(),
        })?;

    let content = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .unwrap_or_default();

    Ok(Completion {
        content,
        model: model.id.to_string(),
        usage: resp.usage_metadata,
    })
}
