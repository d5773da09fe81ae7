//! Relay configuration.
//!
//! Non-secret settings resolved from the environment with defaults.
//! Credentials are not part of this struct; they are resolved lazily by
//! [`crate::credentials::CredentialResolver`] at first use.

use std::path::PathBuf;
use std::time::Duration;

use crate::env::Environment;
use crate::functions::FunctionsConfig;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_VOYAGE_BASE_URL: &str = "https://api.voyageai.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_FUNCTIONS_DIR: &str = "supabase/functions";
pub const DEFAULT_FUNCTIONS_SERVICE: &str = "supabase";
pub const DEFAULT_FUNCTIONS_EXCLUDE_PREFIX: &str = "_";
pub const DEFAULT_ENDPOINT_TEMPLATE: &str = "{base_url}/functions/v1/{name}";

/// Configuration shared by both routers.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// OpenAI API root (no trailing slash).
    pub openai_base_url: String,
    /// Gemini API root (no trailing slash).
    pub gemini_base_url: String,
    /// Voyage API root (no trailing slash).
    pub voyage_base_url: String,
    /// Upper bound for any single outbound HTTP request.
    pub request_timeout: Duration,
    /// Deployed function discovery settings.
    pub functions: FunctionsConfig,
}

impl RelayConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                            | Default                                     |
    /// |-------------------------------------|---------------------------------------------|
    /// | `OPENAI_BASE_URL`                   | `https://api.openai.com`                    |
    /// | `GEMINI_BASE_URL`                   | `https://generativelanguage.googleapis.com` |
    /// | `VOYAGE_BASE_URL`                   | `https://api.voyageai.com`                  |
    /// | `RELAY_REQUEST_TIMEOUT_SECS`        | `120`                                       |
    /// | `RELAY_FUNCTIONS_DIR`               | `supabase/functions`                        |
    /// | `RELAY_FUNCTIONS_SERVICE`           | `supabase`                                  |
    /// | `RELAY_FUNCTIONS_EXCLUDE_PREFIX`    | `_`                                         |
    /// | `RELAY_FUNCTIONS_ENDPOINT_TEMPLATE` | `{base_url}/functions/v1/{name}`            |
    pub fn from_env(env: &Environment) -> Self {
        let request_timeout_secs = env
            .get("RELAY_REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            openai_base_url: base_url(env, "OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            gemini_base_url: base_url(env, "GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            voyage_base_url: base_url(env, "VOYAGE_BASE_URL", DEFAULT_VOYAGE_BASE_URL),
            request_timeout: Duration::from_secs(request_timeout_secs),
            functions: FunctionsConfig {
                dir: PathBuf::from(env.get_or("RELAY_FUNCTIONS_DIR", DEFAULT_FUNCTIONS_DIR)),
                service: env.get_or("RELAY_FUNCTIONS_SERVICE", DEFAULT_FUNCTIONS_SERVICE),
                exclude_prefix: env.get_or(
                    "RELAY_FUNCTIONS_EXCLUDE_PREFIX",
                    DEFAULT_FUNCTIONS_EXCLUDE_PREFIX,
                ),
                endpoint_template: env.get_or(
                    "RELAY_FUNCTIONS_ENDPOINT_TEMPLATE",
                    DEFAULT_ENDPOINT_TEMPLATE,
                ),
            },
        }
    }

    /// Build the shared outbound HTTP client with the configured timeout.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
    }
}

fn base_url(env: &Environment, key: &str, default: &str) -> String {
    env.get_or(key, default).trim_end_matches('/').to_string()
}
