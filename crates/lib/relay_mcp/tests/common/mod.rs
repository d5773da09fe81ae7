//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use relay_core::env::Environment;
use rmcp::model::{CallToolResult, JsonObject, RawContent};
use serde_json::Value;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

pub fn env(pairs: &[(&str, &str)]) -> Arc<Environment> {
    Arc::new(Environment::from_pairs(pairs.iter().copied()))
}

pub fn args(value: Value) -> Option<JsonObject> {
    value.as_object().cloned()
}

/// Decode the single JSON content block of a result.
pub fn payload(result: &CallToolResult) -> Value {
    assert_eq!(result.content.len(), 1, "exactly one content block");
    match &result.content[0].raw {
        RawContent::Text(t) => serde_json::from_str(&t.text).expect("content is JSON"),
        other => panic!("expected text content, got {other:?}"),
    }
}

pub fn ok_payload(result: &CallToolResult) -> Value {
    assert_eq!(result.is_error, Some(false), "unexpected error: {:?}", payload(result));
    payload(result)
}

pub fn error_message(result: &CallToolResult) -> String {
    assert_eq!(result.is_error, Some(true), "expected error envelope");
    payload(result)["error"]
        .as_str()
        .expect("error is a string")
        .to_string()
}
