//! Credential-bearing HTTP client for a single provider.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::credentials::ProviderCredential;

use super::{Provider, ProviderError};

/// HTTP client bound to one provider's base URL and credential.
///
/// Constructed once per process on first successful credential resolution
/// and reused for every later call to that provider.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: Client,
    base_url: String,
    credential: ProviderCredential,
    timeout: Duration,
}

impl ProviderClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        credential: ProviderCredential,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential,
            timeout,
        }
    }

    pub fn provider(&self) -> Provider {
        self.credential.provider
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let key = self.credential.secret.expose();
        match self.provider() {
            Provider::Gemini => builder.header("x-goog-api-key", key),
            Provider::OpenAi | Provider::Voyage => builder.bearer_auth(key),
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        let provider = self.provider().display_name();
        if e.is_timeout() {
            ProviderError::Timeout {
                provider,
                secs: self.timeout.as_secs(),
            }
        } else {
            ProviderError::Transport {
                provider,
                message: e.to_string(),
            }
        }
    }

    /// POST a JSON body to `path` and decode a JSON success body.
    ///
    /// Non-2xx responses become [`ProviderError::Upstream`] carrying the
    /// provider's own error message.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .authorize(self.http.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(ProviderError::Upstream(upstream_message(
                self.provider().display_name(),
                status.as_u16(),
                &text,
            )));
        }

        serde_json::from_str(&text).map_err(|e| ProviderError::MalformedResponse {
            provider: self.provider().display_name(),
            message: e.to_string(),
        })
    }
}

/// Extract a human-readable message from a provider error body.
///
/// Understands `{"error": {"message": ..}}` (OpenAI, Gemini),
/// `{"error": ".."}`, `{"detail": ..}` (Voyage) and `{"message": ..}`;
/// anything else is reported verbatim with the status.
pub fn upstream_message(provider: &str, status: u16, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        ["/error/message", "/error", "/detail", "/message"]
            .iter()
            .find_map(|pointer| v.pointer(pointer).and_then(|m| m.as_str()))
            .map(str::to_string)
    });

    match message {
        Some(m) => format!("{provider} API error ({status}): {m}"),
        None => {
            let body = body.trim();
            if body.is_empty() {
                format!("{provider} request failed: {status}")
            } else {
                format!("{provider} request failed: {status} {body}")
            }
        }
    }
}
