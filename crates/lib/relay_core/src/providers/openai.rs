//! OpenAI text generation.
//!
//! Standard models go through `/v1/chat/completions`; structured models go
//! through the Responses API (`/v1/responses`). The branch is taken on the
//! resolved [`ModelSpec::api_style`].

use serde::{Deserialize, Serialize};

use super::client::ProviderClient;
use super::models::ModelSpec;
use super::{ApiStyle, Completion, ProviderError};

const CHAT_PATH: &str = "/v1/chat/completions";
const RESPONSES_PATH: &str = "/v1/responses";
const PROVIDER: &str = "OpenAI";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
}

#[derive(Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
    usage: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// Generate text with an OpenAI model.
pub async fn complete(
    client: &ProviderClient,
    model: ModelSpec,
    prompt: &str,
    system_prompt: Option<&str>,
) -> Result<Completion, ProviderError> {
    match model.api_style {
        ApiStyle::Standard => {
            let mut messages = Vec::with_capacity(2);
            if let Some(system) = system_prompt {
                messages.push(ChatMessage {
                    role: "system",
                    content: system,
                });
            }
            messages.push(ChatMessage {
                role: "user",
                content: prompt,
            });
            let resp: ChatResponse = client
                .post_json(
                    CHAT_PATH,
                    &ChatRequest {
                        model: model.id,
                        messages,
                    },
                )
                .await?;
            chat_completion(resp, model)
        }
        ApiStyle::Structured => {
            let resp: ResponsesResponse = client
                .post_json(
                    RESPONSES_PATH,
                    &ResponsesRequest {
                        model: model.id,
                        input: prompt,
                        instructions: system_prompt,
                    },
                )
                .await?;
            responses_completion(resp, model)
        }
    }
}

fn chat_completion(resp: ChatResponse, model: ModelSpec) -> Result<Completion, ProviderError> {
    let content = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse {
            provider: PROVIDER,
            message: "no choices returned".to_string(),
        })?
        .message
        .content
        .unwrap_or_default();

    Ok(Completion {
        content,
        model: model.id.to_string(),
        usage: resp.usage,
    })
}

fn responses_completion(
    resp: ResponsesResponse,
    model: ModelSpec,
) -> Result<Completion, ProviderError> {
    let texts: Vec<String> = resp
        .output
        .into_iter()
        .filter(|item| item.kind == "message")
        .flat_map(|item| item.content)
        .filter(|c| c.kind == "output_text")
        .filter_map(|c| c.text)
        .collect();

    if texts.is_empty() {
        return Err(ProviderError::MalformedResponse {
            provider: PROVIDER,
            message: "no output_text in response".to_string(),
        });
    }

    Ok(Completion {
        content: texts.concat(),
        model: model.id.to_string(),
        usage: resp.usage,
    })
}
