//! Integration tests: multimodel tools against a mock provider upstream.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use relay_core::config::RelayConfig;
use relay_mcp::{MultimodelTools, RelayMcpServer};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use common::{args, env, error_message, ok_payload, spawn_upstream};

/// Requests seen by the mock upstream, as (path, auth header, body).
#[derive(Clone, Default)]
struct Recorded(Arc<Mutex<Vec<(String, String, Value)>>>);

impl Recorded {
    async fn push(&self, path: &str, headers: &HeaderMap, body: Value) {
        let auth = headers
            .get("authorization")
            .or_else(|| headers.get("x-goog-api-key"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.0.lock().await.push((path.to_string(), auth, body));
    }

    async fn all(&self) -> Vec<(String, String, Value)> {
        self.0.lock().await.clone()
    }
}

async fn chat(State(rec): State<Recorded>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    rec.push("/v1/chat/completions", &headers, body).await;
    Json(json!({
        "choices": [{"message": {"role": "assistant", "content": "4"}}],
        "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
    }))
}

async fn responses(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.push("/v1/responses", &headers, body).await;
    Json(json!({
        "output": [
            {"type": "reasoning", "content": []},
            {"type": "message", "content": [{"type": "output_text", "text": "structured answer"}]}
        ]
    }))
}

async fn generate(
    State(rec): State<Recorded>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.push(&format!("/v1beta/models/{call}"), &headers, body).await;
    Json(json!({
        "candidates": [{"content": {"parts": [{"text": "four"}], "role": "model"}}],
        "usageMetadata": {"totalTokenCount": 5}
    }))
}

async fn embeddings(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.push("/v1/embeddings", &headers, body).await;
    Json(json!({
        "data": [{"embedding": [0.25, -0.5, 1.0]}],
        "usage": {"total_tokens": 2}
    }))
}

async fn mock_providers() -> (String, Recorded) {
    let rec = Recorded::default();
    let router = Router::new()
        .route("/v1/chat/completions", post(chat))
        .route("/v1/responses", post(responses))
        .route("/v1beta/models/{call}", post(generate))
        .route("/v1/embeddings", post(embeddings))
        .with_state(rec.clone());
    (spawn_upstream(router).await, rec)
}

fn server(base_url: &str, keys: &[(&str, &str)]) -> RelayMcpServer<MultimodelTools> {
    let mut pairs = vec![
        ("OPENAI_BASE_URL", base_url),
        ("GEMINI_BASE_URL", base_url),
        ("VOYAGE_BASE_URL", base_url),
    ];
    pairs.extend_from_slice(keys);
    let env = env(&pairs);
    let config = RelayConfig::from_env(&env);
    RelayMcpServer::new(MultimodelTools::new(env, config).expect("http client"))
}

#[tokio::test]
async fn query_openai_uses_default_model() {
    let (base, rec) = mock_providers().await;
    let server = server(&base, &[("OPENAI_API_KEY", "sk-test")]);

    let result = server
        .call("query_openai", args(json!({"prompt": "2+2?"})), CancellationToken::new())
        .await;
    let body = ok_payload(&result);
    assert_eq!(body["content"], "4");
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["usage"]["total_tokens"], 4);

    let seen = rec.all().await;
    assert_eq!(seen.len(), 1);
    let (path, auth, sent) = &seen[0];
    assert_eq!(path, "/v1/chat/completions");
    assert_eq!(auth, "Bearer sk-test");
    assert_eq!(sent["model"], "gpt-4o");
    assert_eq!(sent["messages"], json!([{"role": "user", "content": "2+2?"}]));
}

#[tokio::test]
async fn system_prompt_leads_chat_messages() {
    let (base, rec) = mock_providers().await;
    let server = server(&base, &[("OPENAI_API_KEY", "sk-test")]);

    let result = server
        .call(
            "query_openai",
            args(json!({"prompt": "hi", "system_prompt": "be brief", "model": "gpt-4o-mini"})),
            CancellationToken::new(),
        )
        .await;
    assert_eq!(ok_payload(&result)["model"], "gpt-4o-mini");

    let sent = &rec.all().await[0].2;
    assert_eq!(sent["messages"][0], json!({"role": "system", "content": "be brief"}));
    assert_eq!(sent["messages"][1], json!({"role": "user", "content": "hi"}));
}

#[tokio::test]
async fn structured_model_goes_through_responses_api() {
    let (base, rec) = mock_providers().await;
    let server = server(&base, &[("OPENAI_API_KEY", "sk-test")]);

    let result = server
        .call(
            "query_openai",
            args(json!({"prompt": "plan", "system_prompt": "think", "model": "o1-pro"})),
            CancellationToken::new(),
        )
        .await;
    let body = ok_payload(&result);
    assert_eq!(body["content"], "structured answer");
    assert_eq!(body["model"], "o1-pro");

    let (path, _, sent) = &rec.all().await[0];
    assert_eq!(path, "/v1/responses");
    assert_eq!(sent, &json!({"model": "o1-pro", "input": "plan", "instructions": "think"}));
}

#[tokio::test]
async fn query_gemini_sends_key_header_and_system_instruction() {
    let (base, rec) = mock_providers().await;
    let server = server(&base, &[("GEMINI_API_KEY", "g-test")]);

    let result = server
        .call(
            "query_gemini",
            args(json!({"prompt": "2+2?", "system_prompt": "numbers only"})),
            CancellationToken::new(),
        )
        .await;
    let body = ok_payload(&result);
    assert_eq!(body["content"], "four");
    assert_eq!(body["model"], "gemini-2.0-flash");
    assert_eq!(body["usage"]["totalTokenCount"], 5);

    let (path, auth, sent) = &rec.all().await[0];
    assert_eq!(path, "/v1beta/models/gemini-2.0-flash:generateContent");
    assert_eq!(auth, "g-test");
    assert_eq!(
        sent["contents"],
        json!([{"role": "user", "parts": [{"text": "2+2?"}]}])
    );
    assert_eq!(
        sent["systemInstruction"],
        json!({"parts": [{"text": "numbers only"}]})
    );
}

#[tokio::test]
async fn embed_voyage_reports_dimensions() {
    let (base, rec) = mock_providers().await;
    let server = server(&base, &[("VOYAGE_API_KEY", "pa-test")]);

    let result = server
        .call(
            "embed_voyage",
            args(json!({"text": "hello", "input_type": "query"})),
            CancellationToken::new(),
        )
        .await;
    let body = ok_payload(&result);
    assert_eq!(body["embedding"], json!([0.25, -0.5, 1.0]));
    assert_eq!(body["dimensions"], 3);
    assert_eq!(body["model"], "voyage-3");

    let (_, auth, sent) = &rec.all().await[0];
    assert_eq!(auth, "Bearer pa-test");
    assert_eq!(
        sent,
        &json!({"input": ["hello"], "model": "voyage-3", "input_type": "query"})
    );
}

#[tokio::test]
async fn parallel_query_survives_one_side_failing() {
    let (base, _rec) = mock_providers().await;
    // Gemini key missing: that branch fails, OpenAI still answers.
    let server = server(&base, &[("OPENAI_API_KEY", "sk-test")]);

    let result = server
        .call("parallel_query", args(json!({"prompt": "2+2?"})), CancellationToken::new())
        .await;
    let body = ok_payload(&result);
    assert_eq!(body["openai"]["content"], "4");
    assert_eq!(body["gemini"], json!({"error": "GEMINI_API_KEY not set"}));
}

#[tokio::test]
async fn parallel_query_reports_upstream_rejection_per_side() {
    let rejecting = Router::new()
        .route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": {"message": "Incorrect API key provided"}})),
                )
            }),
        )
        .route(
            "/v1beta/models/{call}",
            post(|| async {
                Json(json!({"candidates": [{"content": {"parts": [{"text": "ok"}]}}]}))
            }),
        );
    let base = spawn_upstream(rejecting).await;
    let server = server(&base, &[("OPENAI_API_KEY", "bad"), ("GEMINI_API_KEY", "g")]);

    let result = server
        .call("parallel_query", args(json!({"prompt": "hi"})), CancellationToken::new())
        .await;
    let body = ok_payload(&result);
    assert_eq!(
        body["openai"],
        json!({"error": "OpenAI API error (401): Incorrect API key provided"})
    );
    assert_eq!(body["gemini"]["content"], "ok");
}

#[tokio::test]
async fn upstream_error_becomes_error_envelope() {
    let failing = Router::new().route(
        "/v1/embeddings",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, Json(json!({"detail": "Rate limit exceeded"}))) }),
    );
    let base = spawn_upstream(failing).await;
    let server = server(&base, &[("VOYAGE_API_KEY", "pa-test")]);

    let result = server
        .call("embed_voyage", args(json!({"text": "hello"})), CancellationToken::new())
        .await;
    assert_eq!(
        error_message(&result),
        "Voyage API error (429): Rate limit exceeded"
    );
}

#[tokio::test]
async fn credentials_fall_back_to_secret_store_once() {
    let (base, _rec) = mock_providers().await;

    let lookups = Arc::new(AtomicUsize::new(0));
    let counter = lookups.clone();
    let store = Router::new().route(
        "/rest/v1/rpc/get_secret",
        post(move |Json(body): Json<Value>| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                assert_eq!(body["secret_name"], "OPENAI_API_KEY");
                Json(json!("sk-from-store"))
            }
        }),
    );
    let store_url = spawn_upstream(store).await;

    let server = server(
        &base,
        &[
            ("SUPABASE_URL", store_url.as_str()),
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
        ],
    );

    for _ in 0..3 {
        let result = server
            .call("query_openai", args(json!({"prompt": "hi"})), CancellationToken::new())
            .await;
        assert_eq!(ok_payload(&result)["content"], "4");
    }
    assert_eq!(lookups.load(Ordering::SeqCst), 1, "client is memoized");
}

#[tokio::test]
async fn slow_upstream_times_out_with_provider_message() {
    let slow = Router::new().route(
        "/v1/embeddings",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"data": [{"embedding": [0.0]}]}))
        }),
    );
    let base = spawn_upstream(slow).await;
    let server = server(
        &base,
        &[("VOYAGE_API_KEY", "pa-test"), ("RELAY_REQUEST_TIMEOUT_SECS", "1")],
    );

    let result = server
        .call("embed_voyage", args(json!({"text": "hello"})), CancellationToken::new())
        .await;
    assert_eq!(
        error_message(&result),
        "Voyage request timed out after 1s"
    );
}
