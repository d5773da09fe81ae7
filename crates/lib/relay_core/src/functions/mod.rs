//! Deployed function discovery and invocation.
//!
//! Functions live one per subdirectory of a functions root (for example
//! `supabase/functions/<name>/index.ts`). Discovery scans that root on every
//! call; invocation POSTs a JSON payload to the function's endpoint with the
//! service key.

pub mod discovery;
pub mod invoke;

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Function discovery and endpoint settings.
#[derive(Debug, Clone)]
pub struct FunctionsConfig {
    /// Directory whose subdirectories are functions.
    pub dir: PathBuf,
    /// Service label reported with every function.
    pub service: String,
    /// Subdirectories starting with this prefix are shared code, not functions.
    pub exclude_prefix: String,
    /// Endpoint template with `{base_url}` and `{name}` placeholders.
    pub endpoint_template: String,
}

impl FunctionsConfig {
    /// Compute the invocation endpoint for `name` under `base_url`.
    pub fn endpoint_url(&self, base_url: &str, name: &str) -> String {
        self.endpoint_template
            .replace("{base_url}", base_url.trim_end_matches('/'))
            .replace("{name}", name)
    }
}

/// Errors from discovery or invocation.
#[derive(Debug, Error)]
pub enum FunctionsError {
    #[error("{0} not set")]
    NotConfigured(String),

    #[error("Invalid function name: '{0}'")]
    InvalidName(String),

    #[error("Function {function} request failed: {message}")]
    Transport { function: String, message: String },

    #[error("Function {function} request timed out after {secs}s")]
    Timeout { function: String, secs: u64 },

    #[error("Failed to scan functions directory: {0}")]
    Io(#[from] std::io::Error),
}

/// A deployed, callable function found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredFunction {
    pub name: String,
    pub service: String,
    pub path: String,
    /// `None` when no base URL is configured.
    pub endpoint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENDPOINT_TEMPLATE;

    fn config(template: &str) -> FunctionsConfig {
        FunctionsConfig {
            dir: PathBuf::from("supabase/functions"),
            service: "supabase".into(),
            exclude_prefix: "_".into(),
            endpoint_template: template.into(),
        }
    }

    #[test]
    fn endpoint_from_default_template() {
        let url = config(DEFAULT_ENDPOINT_TEMPLATE).endpoint_url("https://abc.supabase.co/", "hello");
        assert_eq!(url, "https://abc.supabase.co/functions/v1/hello");
    }

    #[test]
    fn endpoint_from_custom_template() {
        let url = config("{base_url}/api/{name}/run").endpoint_url("http://localhost:54321", "resize");
        assert_eq!(url, "http://localhost:54321/api/resize/run");
    }
}
