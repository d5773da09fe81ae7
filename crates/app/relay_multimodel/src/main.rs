//! Relay multimodel MCP server binary.
//!
//! Launched by an MCP client as a child process. Speaks MCP on stdin/stdout;
//! logs go to stderr. Provider keys are read on first use, so the server
//! starts even when none are set.

use std::sync::Arc;

use relay_core::config::RelayConfig;
use relay_core::env::Environment;
use relay_mcp::MultimodelTools;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // stdout carries the protocol; logs must stay on stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let env = Arc::new(Environment::from_process());
    let config = RelayConfig::from_env(&env);
    debug!(
        openai = %config.openai_base_url,
        gemini = %config.gemini_base_url,
        voyage = %config.voyage_base_url,
        timeout_secs = config.request_timeout.as_secs(),
        "multimodel configuration loaded"
    );

    let tools = MultimodelTools::new(env, config)?;
    relay_mcp::serve_stdio(tools).await?;
    Ok(())
}
