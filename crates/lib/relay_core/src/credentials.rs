//! Credential resolution for provider API keys.
//!
//! Resolution order for a variable:
//! 1. the environment snapshot;
//! 2. the remote secret store, when `SUPABASE_URL` and
//!    `SUPABASE_SERVICE_ROLE_KEY` are both configured;
//! 3. otherwise `"{VAR} not set"`.
//!
//! A failing secret store never replaces the `not set` error.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::env::Environment;
use crate::providers::Provider;

/// Base URL of the project hosting the secret store and deployed functions.
pub const PROJECT_URL_VAR: &str = "SUPABASE_URL";
/// Privileged key for the secret store and function invocation.
pub const SERVICE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

const SECRET_RPC_PATH: &str = "/rest/v1/rpc/get_secret";

/// Credential lookup errors.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{0} not set")]
    NotSet(&'static str),
}

/// A secret value that never prints itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw value for use in an outbound request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Secret resolved for a specific provider.
#[derive(Debug, Clone)]
pub struct ProviderCredential {
    pub provider: Provider,
    pub secret: Secret,
}

/// Errors from the remote secret store. Only ever logged.
#[derive(Debug, Error)]
pub enum SecretStoreError {
    #[error("secret store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("secret store returned status {0}")]
    Status(u16),
}

#[derive(Serialize)]
struct SecretRequest<'a> {
    secret_name: &'a str,
}

/// Remote secret store reachable with the privileged service key.
#[derive(Debug, Clone)]
pub struct SecretStore {
    http: reqwest::Client,
    base_url: String,
    service_key: Secret,
}

impl SecretStore {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, service_key: Secret) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key,
        }
    }

    /// Build a store when both the project URL and the service key are set.
    pub fn from_env(env: &Environment, http: reqwest::Client) -> Option<Self> {
        let base_url = env.get(PROJECT_URL_VAR)?;
        let service_key = env.get(SERVICE_KEY_VAR)?;
        Some(Self::new(http, base_url, Secret::new(service_key)))
    }

    /// Fetch a named secret. `Ok(None)` when the store holds no value.
    pub async fn fetch(&self, name: &str) -> Result<Option<Secret>, SecretStoreError> {
        let key = self.service_key.expose();
        let resp = self
            .http
            .post(format!("{}{SECRET_RPC_PATH}", self.base_url))
            .header("apikey", key)
            .bearer_auth(key)
            .json(&SecretRequest { secret_name: name })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SecretStoreError::Status(resp.status().as_u16()));
        }

        let value: serde_json::Value = resp.json().await?;
        Ok(value
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Secret::new))
    }
}

/// Resolves credentials from the environment with optional remote fallback.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    env: Arc<Environment>,
    store: Option<SecretStore>,
}

impl CredentialResolver {
    pub fn new(env: Arc<Environment>, store: Option<SecretStore>) -> Self {
        Self { env, store }
    }

    /// Resolver whose fallback store is configured from the same environment.
    pub fn from_env(env: Arc<Environment>, http: reqwest::Client) -> Self {
        let store = SecretStore::from_env(&env, http);
        Self { env, store }
    }

    /// Whether a remote fallback is configured.
    pub fn has_secret_store(&self) -> bool {
        self.store.is_some()
    }

    /// Resolve the secret held in `var`.
    pub async fn resolve(&self, var: &'static str) -> Result<Secret, CredentialError> {
        if let Some(value) = self.env.get(var) {
            return Ok(Secret::new(value));
        }

        if let Some(store) = &self.store {
            match store.fetch(var).await {
                Ok(Some(secret)) => {
                    debug!(var, "credential resolved from secret store");
                    return Ok(secret);
                }
                Ok(None) => debug!(var, "secret store holds no value"),
                Err(e) => debug!(var, error = %e, "secret store lookup failed"),
            }
        }

        Err(CredentialError::NotSet(var))
    }

    /// Resolve the API key for a provider.
    pub async fn resolve_provider(
        &self,
        provider: Provider,
    ) -> Result<ProviderCredential, CredentialError> {
        let secret = self.resolve(provider.env_var()).await?;
        Ok(ProviderCredential { provider, secret })
    }
}
