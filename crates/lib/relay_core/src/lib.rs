//! # relay_core
//!
//! Core logic for the Relay MCP servers.
//!
//! Everything here is protocol-agnostic: credential resolution, the static
//! provider model registry, provider request shaping, and discovery/invocation
//! of deployed functions. `relay_mcp` wraps these in MCP tools.

pub mod config;
pub mod credentials;
pub mod env;
pub mod functions;
pub mod providers;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
