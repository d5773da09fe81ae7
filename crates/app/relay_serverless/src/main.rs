//! Relay serverless MCP server binary.
//!
//! Discovers functions under `RELAY_FUNCTIONS_DIR` and invokes them at
//! `SUPABASE_URL` with `SUPABASE_SERVICE_ROLE_KEY`. Speaks MCP on
//! stdin/stdout; logs go to stderr.

use std::sync::Arc;

use relay_core::config::RelayConfig;
use relay_core::env::Environment;
use relay_mcp::ServerlessTools;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

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
        dir = %config.functions.dir.display(),
        service = %config.functions.service,
        "serverless configuration loaded"
    );

    let tools = ServerlessTools::new(env, config)?;
    relay_mcp::serve_stdio(tools).await?;
    Ok(())
}
