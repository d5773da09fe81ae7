//! Invoke a deployed function over HTTP.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::credentials::{PROJECT_URL_VAR, SERVICE_KEY_VAR, Secret};
use crate::env::Environment;

use super::{FunctionsConfig, FunctionsError};

/// Fully resolved invocation target.
#[derive(Debug, Clone)]
pub struct InvocationTarget {
    pub function: String,
    pub url: String,
    service_key: Secret,
}

impl InvocationTarget {
    /// Resolve the URL and service key for `name`.
    ///
    /// An explicit `endpoint` wins over the computed one. Fails with the
    /// missing variable name(s) when configuration is absent.
    pub fn resolve(
        config: &FunctionsConfig,
        env: &Environment,
        name: &str,
        endpoint: Option<&str>,
    ) -> Result<Self, FunctionsError> {
        let name = validate_name(name)?;

        let base_url = env.get(PROJECT_URL_VAR);
        let service_key = env.get(SERVICE_KEY_VAR);
        if base_url.is_none() && service_key.is_none() {
            return Err(FunctionsError::NotConfigured(format!(
                "{PROJECT_URL_VAR} and {SERVICE_KEY_VAR}"
            )));
        }

        let url = match endpoint.map(str::trim).filter(|e| !e.is_empty()) {
            Some(endpoint) => endpoint.to_string(),
            None => {
                let base_url = base_url
                    .ok_or_else(|| FunctionsError::NotConfigured(PROJECT_URL_VAR.to_string()))?;
                config.endpoint_url(base_url, name)
            }
        };

        let service_key = service_key
            .ok_or_else(|| FunctionsError::NotConfigured(SERVICE_KEY_VAR.to_string()))?;

        Ok(Self {
            function: name.to_string(),
            url,
            service_key: Secret::new(service_key),
        })
    }
}

/// Raw outcome of an invocation. Any HTTP status is reported, not raised.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationResponse {
    /// Parsed JSON when the response declares JSON, else the raw text.
    pub result: serde_json::Value,
    pub status: u16,
}

/// Trim `name` and accept only `[A-Za-z0-9_-]`, keeping it a single path
/// segment of the computed URL.
fn validate_name(name: &str) -> Result<&str, FunctionsError> {
    let trimmed = name.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(FunctionsError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

/// POST `payload` to the target with the service key.
pub async fn invoke(
    http: &Client,
    target: &InvocationTarget,
    payload: &serde_json::Value,
    timeout: Duration,
) -> Result<InvocationResponse, FunctionsError> {
    let key = target.service_key.expose();
    let transport = |e: reqwest::Error| {
        if e.is_timeout() {
            FunctionsError::Timeout {
                function: target.function.clone(),
                secs: timeout.as_secs(),
            }
        } else {
            FunctionsError::Transport {
                function: target.function.clone(),
                message: e.to_string(),
            }
        }
    };

    let resp = http
        .post(&target.url)
        .bearer_auth(key)
        .header("apikey", key)
        .json(payload)
        .send()
        .await
        .map_err(transport)?;

    let status = resp.status().as_u16();
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("json"));
    let text = resp.text().await.map_err(transport)?;

    let result = if is_json {
        serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
    } else {
        serde_json::Value::String(text)
    };

    Ok(InvocationResponse { result, status })
}
