//! Serverless tool set: discover and invoke deployed functions.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relay_core::config::RelayConfig;
use relay_core::credentials::PROJECT_URL_VAR;
use relay_core::env::Environment;
use relay_core::functions::invoke::{InvocationTarget, invoke};
use relay_core::functions::{FunctionsConfig, FunctionsError, discovery};
use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use tracing::debug;

use crate::catalog::descriptor;
use crate::error::ToolError;
use crate::tools::types::{DiscoverRequest, DiscoverResult, InvokeRequest, InvokeResult};
use crate::tools::{ToolSet, parse_call, require_text, to_json};

pub const DISCOVER: &str = "discover";
pub const INVOKE: &str = "invoke";

/// Typed serverless tool call.
#[derive(Debug, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ServerlessCall {
    Discover(DiscoverRequest),
    Invoke(InvokeRequest),
}

impl ServerlessCall {
    pub fn parse(name: &str, arguments: JsonObject) -> Result<Self, ToolError> {
        let call: Self = parse_call(name, arguments)?;
        if let Self::Invoke(r) = &call {
            require_text(name, "name", &r.name)?;
        }
        Ok(call)
    }
}

/// Tool set over the deployed functions of one project.
///
/// Discovery rescans the functions directory on every call. Configuration is
/// read from the environment snapshot per call, so a missing URL or key only
/// fails the tool that needs it.
pub struct ServerlessTools {
    env: Arc<Environment>,
    functions: FunctionsConfig,
    http: reqwest::Client,
    timeout: Duration,
}

impl ServerlessTools {
    pub fn new(env: Arc<Environment>, config: RelayConfig) -> Result<Self, reqwest::Error> {
        let http = config.http_client()?;
        Ok(Self {
            env,
            functions: config.functions,
            http,
            timeout: config.request_timeout,
        })
    }

    /// List deployed functions.
    pub async fn discover(&self) -> Result<DiscoverResult, FunctionsError> {
        let base_url = self.env.get(PROJECT_URL_VAR);
        let functions = discovery::discover(&self.functions, base_url).await?;
        debug!(count = functions.len(), "functions discovered");
        Ok(DiscoverResult {
            count: functions.len(),
            functions,
        })
    }

    /// Invoke a function by name with a JSON payload.
    pub async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResult, FunctionsError> {
        let target = InvocationTarget::resolve(
            &self.functions,
            &self.env,
            &request.name,
            request.endpoint.as_deref(),
        )?;
        let payload = serde_json::Value::Object(request.payload.unwrap_or_default());

        debug!(function = %target.function, url = %target.url, "invoking function");
        let response = invoke(&self.http, &target, &payload, self.timeout).await?;
        debug!(function = %target.function, status = response.status, "function responded");

        Ok(InvokeResult {
            function: target.function,
            service: self.functions.service.clone(),
            result: response.result,
            status: response.status,
        })
    }
}

#[async_trait]
impl ToolSet for ServerlessTools {
    fn name(&self) -> &'static str {
        "serverless"
    }

    fn instructions(&self) -> &'static str {
        "Discover the serverless functions deployed in this project and invoke them with a JSON payload."
    }

    fn catalog(&self) -> Vec<Tool> {
        vec![
            descriptor::<DiscoverRequest>(
                DISCOVER,
                "List deployed serverless functions with their service and endpoint",
            ),
            descriptor::<InvokeRequest>(
                INVOKE,
                "Invoke a deployed serverless function by name with a JSON payload",
            ),
        ]
    }

    async fn dispatch(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<serde_json::Value, ToolError> {
        match ServerlessCall::parse(name, arguments)? {
            ServerlessCall::Discover(_) => to_json(&self.discover().await?),
            ServerlessCall::Invoke(r) => to_json(&self.invoke(r).await?),
        }
    }
}
