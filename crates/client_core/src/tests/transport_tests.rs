use std::{collections::HashMap, sync::Arc};

use super::*;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::{
    domain::{Framework, HistoryId, Tone},
    protocol::Metric,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    generate_bodies: Arc<Mutex<Vec<Value>>>,
    history_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn handle_generate(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.generate_bodies.lock().await.push(body);
    Json(json!({
        "disclosure_text": "Acme reduced its emissions.",
        "improvement_suggestions": ["Report Scope 3", "Add targets"],
        "model": "gpt-4o-mini",
        "total_tokens": 512,
    }))
}

async fn handle_history(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.history_queries.lock().await.push(query);
    Json(json!([{
        "id": 1,
        "company_name": "Acme",
        "year": 2024,
        "frameworks": ["CSRD"],
        "created_at": "2024-01-01T00:00:00Z",
        "disclosure_preview": "...",
    }]))
}

async fn handle_health() -> Json<Value> {
    Json(json!({"status": "ok", "has_openai_key": false}))
}

async fn handle_failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"detail": "LLM generation failed"})),
    )
}

async fn spawn_backend(router: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

async fn spawn_happy_backend() -> (String, ServerState) {
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/generate-disclosure", post(handle_generate))
        .route("/api/history", get(handle_history))
        .route("/health", get(handle_health))
        .with_state(state.clone());
    (spawn_backend(app).await, state)
}

fn sample_request() -> DisclosureRequest {
    DisclosureRequest {
        company_name: "Acme".into(),
        sector: "Technology".into(),
        year: 2024,
        frameworks: vec![Framework::Csrd, Framework::Gri],
        metrics: vec![Metric {
            name: "Scope 1 emissions".into(),
            value: "12000".into(),
            unit: Some("tCO2e".into()),
        }],
        initiatives: "Renewable electricity".into(),
        tone: Tone::Regulatory,
    }
}

#[tokio::test]
async fn generate_posts_json_body_and_parses_response() {
    let (base_url, state) = spawn_happy_backend().await;
    let client = HttpDisclosureClient::new(base_url);

    let response = client
        .generate_disclosure(&sample_request())
        .await
        .expect("generate");

    assert_eq!(response.disclosure_text, "Acme reduced its emissions.");
    assert_eq!(
        response.improvement_suggestions,
        vec!["Report Scope 3", "Add targets"]
    );
    assert_eq!(response.model.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(response.prompt_tokens, None);

    let bodies = state.generate_bodies.lock().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["company_name"], "Acme");
    assert_eq!(bodies[0]["frameworks"], json!(["CSRD", "GRI"]));
    assert_eq!(bodies[0]["metrics"][0]["unit"], "tCO2e");
    assert_eq!(bodies[0]["tone"], "regulatory");
}

#[tokio::test]
async fn history_sends_limit_query_parameter() {
    let (base_url, state) = spawn_happy_backend().await;
    let client = HttpDisclosureClient::new(format!("{base_url}/"));

    let items = client.history(3).await.expect("history");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, HistoryId(1));

    client.history_default().await.expect("history default");

    let queries = state.history_queries.lock().await;
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("3"));
    assert_eq!(queries[1].get("limit").map(String::as_str), Some("10"));
}

#[tokio::test]
async fn health_reports_backend_status() {
    let (base_url, _state) = spawn_happy_backend().await;
    let client = HttpDisclosureClient::new(base_url);

    let health = client.health().await.expect("health");
    assert_eq!(health.status, "ok");
    assert!(!health.has_openai_key);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let app = Router::new()
        .route("/api/generate-disclosure", post(handle_failure))
        .route("/api/history", get(handle_failure));
    let client = HttpDisclosureClient::new(spawn_backend(app).await);

    let err = client
        .generate_disclosure(&sample_request())
        .await
        .expect_err("500 must fail");
    assert!(err.to_string().contains("500"));

    assert!(client.history(10).await.is_err());
}

#[tokio::test]
async fn unreachable_backend_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpDisclosureClient::new(format!("http://{addr}"));
    assert!(client.generate_disclosure(&sample_request()).await.is_err());
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let client = HttpDisclosureClient::new("http://localhost:8000/");
    assert_eq!(client.base_url(), "http://localhost:8000");
    assert_eq!(
        client.endpoint("/api/history"),
        "http://localhost:8000/api/history"
    );
}
