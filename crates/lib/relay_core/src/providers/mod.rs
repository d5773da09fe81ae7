//! Provider module: text generation and embeddings over provider HTTP APIs.
//!
//! # Public API
//!
//! - [`models::ProviderModelConfig`]: static per-provider model allow-list
//! - [`client::ProviderClient`]: credential-bearing HTTP client for one provider
//! - [`openai::complete`], [`gemini::complete`]: text generation
//! - [`voyage::embed`]: embedding generation
//!
//! # Providers
//!
//! - `"openai"`: chat/completions, or the Responses API for structured models
//! - `"google"`: Gemini `generateContent`
//! - `"voyage"`: Voyage embeddings

pub mod client;
pub mod gemini;
pub mod models;
pub mod openai;
pub mod voyage;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::credentials::CredentialError;

/// External provider reachable by the multimodel router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Gemini,
    Voyage,
}

impl Provider {
    /// Logical provider key.
    pub fn key(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "google",
            Self::Voyage => "voyage",
        }
    }

    /// Environment variable holding the provider API key.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
            Self::Voyage => "VOYAGE_API_KEY",
        }
    }

    /// Human-readable provider name used in error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Voyage => "Voyage",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Request/response convention a model is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStyle {
    /// Message list in, single text out (chat/completions, generateContent).
    Standard,
    /// Structured input/output (OpenAI Responses API).
    Structured,
}

/// Errors that can occur while calling a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Unsupported model '{model}' for {provider}. Available: {available}")]
    UnsupportedModel {
        provider: &'static str,
        model: String,
        available: String,
    },

    #[error("{0}")]
    Upstream(String),

    #[error("{provider} request failed: {message}")]
    Transport { provider: &'static str, message: String },

    #[error("{provider} request timed out after {secs}s")]
    Timeout { provider: &'static str, secs: u64 },

    #[error("{provider} response parse error: {message}")]
    MalformedResponse { provider: &'static str, message: String },
}

/// Normalised text-generation result.
#[derive(Debug, Clone, Serialize)]
pub struct Completion {
    pub content: String,
    /// Model actually used.
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<serde_json::Value>,
}

/// Normalised embedding result.
#[derive(Debug, Clone, Serialize)]
pub struct Embedding {
    pub embedding: Vec<f64>,
    pub dimensions: usize,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_keys_and_vars_are_distinct() {
        let all = [Provider::OpenAi, Provider::Gemini, Provider::Voyage];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.env_var(), b.env_var());
                assert_ne!(a.key(), b.key());
            }
        }
    }

    #[test]
    fn completion_omits_missing_usage() {
        let completion = Completion {
            content: "4".into(),
            model: "gpt-4o".into(),
            usage: None,
        };
        let json = serde_json::to_value(&completion).expect("serialize");
        assert_eq!(json, serde_json::json!({"content": "4", "model": "gpt-4o"}));
    }
}
