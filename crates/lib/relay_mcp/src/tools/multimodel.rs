//! Multimodel tool set: OpenAI, Gemini and Voyage behind one MCP server.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::config::RelayConfig;
use relay_core::credentials::CredentialResolver;
use relay_core::env::Environment;
use relay_core::providers::client::ProviderClient;
use relay_core::providers::models::ProviderModelConfig;
use relay_core::providers::voyage::InputType;
use relay_core::providers::{Completion, Embedding, Provider, ProviderError, gemini, openai, voyage};
use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::catalog::descriptor;
use crate::error::ToolError;
use crate::tools::types::{
    EmbedVoyageRequest, ParallelQueryRequest, ParallelQueryResult, QueryGeminiRequest,
    QueryOpenAiRequest,
};
use crate::tools::{ToolSet, parse_call, require_text, to_json};

pub const QUERY_OPENAI: &str = "query_openai";
pub const QUERY_GEMINI: &str = "query_gemini";
pub const EMBED_VOYAGE: &str = "embed_voyage";
pub const PARALLEL_QUERY: &str = "parallel_query";

/// Typed multimodel tool call.
#[derive(Debug, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum MultimodelCall {
    QueryOpenai(QueryOpenAiRequest),
    QueryGemini(QueryGeminiRequest),
    EmbedVoyage(EmbedVoyageRequest),
    ParallelQuery(ParallelQueryRequest),
}

impl MultimodelCall {
    /// Parse and validate a call at the dispatcher boundary.
    pub fn parse(name: &str, arguments: JsonObject) -> Result<Self, ToolError> {
        let call: Self = parse_call(name, arguments)?;
        match &call {
            Self::QueryOpenai(r) => require_text(name, "prompt", &r.prompt)?,
            Self::QueryGemini(r) => require_text(name, "prompt", &r.prompt)?,
            Self::EmbedVoyage(r) => require_text(name, "text", &r.text)?,
            Self::ParallelQuery(r) => require_text(name, "prompt", &r.prompt)?,
        }
        Ok(call)
    }
}

/// Tool set fanning out to LLM and embedding providers.
///
/// Provider clients are created on first use and kept for the life of the
/// process; a failed credential lookup leaves the slot empty.
pub struct MultimodelTools {
    config: RelayConfig,
    http: reqwest::Client,
    credentials: CredentialResolver,
    openai: OnceCell<ProviderClient>,
    gemini: OnceCell<ProviderClient>,
    voyage: OnceCell<ProviderClient>,
}

impl MultimodelTools {
    /// Create the tool set. No credentials are read until first use.
    pub fn new(env: Arc<Environment>, config: RelayConfig) -> Result<Self, reqwest::Error> {
        let http = config.http_client()?;
        let credentials = CredentialResolver::from_env(env, http.clone());
        Ok(Self {
            config,
            http,
            credentials,
            openai: OnceCell::new(),
            gemini: OnceCell::new(),
            voyage: OnceCell::new(),
        })
    }

    async fn client(&self, provider: Provider) -> Result<&ProviderClient, ProviderError> {
        let (cell, base_url) = match provider {
            Provider::OpenAi => (&self.openai, &self.config.openai_base_url),
            Provider::Gemini => (&self.gemini, &self.config.gemini_base_url),
            Provider::Voyage => (&self.voyage, &self.config.voyage_base_url),
        };

        cell.get_or_try_init(|| async {
            let credential = self.credentials.resolve_provider(provider).await?;
            debug!(provider = %provider, "provider client initialised");
            Ok::<_, ProviderError>(ProviderClient::new(
                self.http.clone(),
                base_url.as_str(),
                credential,
                self.config.request_timeout,
            ))
        })
        .await
    }

    /// Query an OpenAI model.
    pub async fn query_openai(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        model: Option<&str>,
    ) -> Result<Completion, ProviderError> {
        let spec = ProviderModelConfig::for_provider(Provider::OpenAi).resolve(model)?;
        let client = self.client(Provider::OpenAi).await?;
        openai::complete(client, spec, prompt, system_prompt).await
    }

    /// Query a Gemini model.
    pub async fn query_gemini(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        model: Option<&str>,
    ) -> Result<Completion, ProviderError> {
        let spec = ProviderModelConfig::for_provider(Provider::Gemini).resolve(model)?;
        let client = self.client(Provider::Gemini).await?;
        gemini::complete(client, spec, prompt, system_prompt).await
    }

    /// Embed text with Voyage.
    pub async fn embed_voyage(
        &self,
        text: &str,
        input_type: Option<InputType>,
        model: Option<&str>,
    ) -> Result<Embedding, ProviderError> {
        let spec = ProviderModelConfig::for_provider(Provider::Voyage).resolve(model)?;
        let client = self.client(Provider::Voyage).await?;
        voyage::embed(client, spec, text, input_type).await
    }

    /// Query OpenAI and Gemini concurrently.
    ///
    /// Both branches always settle; a failure on one side is reported next
    /// to the other side's result.
    pub async fn parallel_query(
        &self,
        request: &ParallelQueryRequest,
    ) -> ParallelQueryResult<Completion> {
        let system_prompt = request.system_prompt.as_deref();
        let (openai, gemini) = tokio::join!(
            self.query_openai(&request.prompt, system_prompt, request.openai_model.as_deref()),
            self.query_gemini(&request.prompt, system_prompt, request.gemini_model.as_deref()),
        );

        if let Err(e) = &openai {
            debug!(error = %e, "parallel_query: openai branch failed");
        }
        if let Err(e) = &gemini {
            debug!(error = %e, "parallel_query: gemini branch failed");
        }

        ParallelQueryResult {
            openai: openai.into(),
            gemini: gemini.into(),
        }
    }
}

#[async_trait]
impl ToolSet for MultimodelTools {
    fn name(&self) -> &'static str {
        "multimodel"
    }

    fn instructions(&self) -> &'static str {
        "Query OpenAI and Gemini models, generate Voyage embeddings, or fan one prompt out to both LLM providers at once."
    }

    fn catalog(&self) -> Vec<Tool> {
        vec![
            descriptor::<QueryOpenAiRequest>(
                QUERY_OPENAI,
                "Query an OpenAI model and return its text response",
            ),
            descriptor::<QueryGeminiRequest>(
                QUERY_GEMINI,
                "Query a Google Gemini model and return its text response",
            ),
            descriptor::<EmbedVoyageRequest>(
                EMBED_VOYAGE,
                "Generate a Voyage AI embedding vector for text",
            ),
            descriptor::<ParallelQueryRequest>(
                PARALLEL_QUERY,
                "Send one prompt to OpenAI and Gemini concurrently and return both results; a failure on one side does not fail the other",
            ),
        ]
    }

    async fn dispatch(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<serde_json::Value, ToolError> {
        match MultimodelCall::parse(name, arguments)? {
            MultimodelCall::QueryOpenai(r) => to_json(
                &self
                    .query_openai(&r.prompt, r.system_prompt.as_deref(), r.model.as_deref())
                    .await?,
            ),
            MultimodelCall::QueryGemini(r) => to_json(
                &self
                    .query_gemini(&r.prompt, r.system_prompt.as_deref(), r.model.as_deref())
                    .await?,
            ),
            MultimodelCall::EmbedVoyage(r) => to_json(
                &self
                    .embed_voyage(&r.text, r.input_type, r.model.as_deref())
                    .await?,
            ),
            MultimodelCall::ParallelQuery(r) => to_json(&self.parallel_query(&r).await),
        }
    }
}
