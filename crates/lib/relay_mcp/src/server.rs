//! MCP server handler: the request dispatcher shared by every tool set.

use std::sync::Arc;

use rmcp::{
    ErrorData, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::envelope;
use crate::error::ToolError;
use crate::tools::ToolSet;

/// Relay MCP server handler.
///
/// Holds one tool set and its catalog, built once at construction and
/// served unchanged on every `tools/list`. One instance per process.
pub struct RelayMcpServer<T: ToolSet> {
    tools: Arc<T>,
    catalog: Arc<[Tool]>,
}

impl<T: ToolSet> RelayMcpServer<T> {
    pub fn new(tools: T) -> Self {
        let catalog = tools.catalog().into();
        Self {
            tools: Arc::new(tools),
            catalog,
        }
    }

    /// Server name reported in logs.
    pub fn name(&self) -> &'static str {
        self.tools.name()
    }

    /// The static tool catalog.
    pub fn catalog(&self) -> Vec<Tool> {
        self.catalog.to_vec()
    }

    /// Dispatch one tool call and wrap the outcome in an envelope.
    ///
    /// Unknown names are rejected before the tool set is consulted. A
    /// cancelled `ct` abandons the in-flight handler.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
        ct: CancellationToken,
    ) -> CallToolResult {
        debug!(tool = name, "tool call received");

        let outcome = if self.catalog.iter().any(|t| t.name == name) {
            tokio::select! {
                biased;
                _ = ct.cancelled() => Err(ToolError::Cancelled),
                result = self.tools.dispatch(name, arguments.unwrap_or_default()) => result,
            }
        } else {
            Err(ToolError::UnknownTool(name.to_string()))
        };

        match &outcome {
            Ok(_) => debug!(tool = name, "tool call succeeded"),
            Err(e) => warn!(tool = name, error = %e, "tool call failed"),
        }

        envelope::from_outcome(outcome)
    }
}

impl<T: ToolSet> ServerHandler for RelayMcpServer<T> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.tools.instructions().into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.catalog()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(self.call(&request.name, request.arguments, context.ct).await)
    }
}
