//! # relay_mcp
//!
//! MCP (Model Context Protocol) tool routers for Relay.
//!
//! A [`ToolSet`] describes a fixed catalog of tools and how to dispatch a
//! call to one of them. [`RelayMcpServer`] wraps any tool set in an rmcp
//! `ServerHandler`, funnels every outcome through the [`envelope`] builder,
//! and is served over stdio by [`serve_stdio`]. Two tool sets ship here:
//! [`MultimodelTools`] and [`ServerlessTools`].

pub mod catalog;
pub mod envelope;
pub mod error;
pub mod server;
pub mod tools;

use rmcp::ServiceExt;
use thiserror::Error;
use tracing::debug;

pub use error::ToolError;
pub use server::RelayMcpServer;
pub use tools::ToolSet;
pub use tools::multimodel::MultimodelTools;
pub use tools::serverless::ServerlessTools;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Errors that end a stdio session.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("MCP initialization failed: {0}")]
    Initialize(String),

    #[error("MCP service task failed: {0}")]
    Join(String),
}

/// The startup line written to stderr once the server is serving.
pub fn running_notice(name: &str) -> String {
    format!("{name} MCP server running on stdio")
}

/// Serve a tool set over stdin/stdout until the client disconnects.
///
/// Writes a single "running" notice to stderr once the MCP handshake has
/// completed.
pub async fn serve_stdio<T: ToolSet>(tools: T) -> Result<(), ServeError> {
    let server = RelayMcpServer::new(tools);
    let name = server.name();

    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| ServeError::Initialize(e.to_string()))?;

    // Always written, regardless of RUST_LOG.
    eprintln!("{}", running_notice(name));
    debug!(server = name, version = version(), "MCP handshake complete");

    running
        .waiting()
        .await
        .map_err(|e| ServeError::Join(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }

    #[test]
    fn running_notice_names_the_server() {
        assert_eq!(
            running_notice("multimodel"),
            "multimodel MCP server running on stdio"
        );
    }
}
