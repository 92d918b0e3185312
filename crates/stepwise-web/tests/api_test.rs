//! End-to-end tests of the HTTP surface against the in-memory store.
//!
//! Run with: cargo test --package stepwise-web --test api_test

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use stepwise_common::SolutionRecord;
use stepwise_db::DbError;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use stepwise_db::{MemorySolutionStore, SharedStore, SolutionStore};
use uuid::Uuid;
use stepwise_solver::{Solver, TemplateRenderer};
use stepwise_web::handlers::solve::SolveResponse;
use stepwise_web::router::build_router;
use stepwise_web::state::{AppEvent, AppState};
use tower::ServiceExt;

const TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../stepwise-solver/templates");

fn state_with_templates(dir: &str) -> (AppState, SharedStore) {
    let store: SharedStore = Arc::new(MemorySolutionStore::new());
    let state = AppState::new(Solver::new(TemplateRenderer::new(dir)), store.clone());
    (state, store)
}

fn app() -> (Router, SharedStore) {
    let (state, store) = state_with_templates(TEMPLATES);
    (build_router(state), store)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn solve_pythagorean_returns_rendered_html() {
    let (app, store) = app();
    let (status, body) = post_json(
        &app,
        "/api/solve",
        json!({"problemType": "pythagorean", "inputs": {"a": 3, "b": 4}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: SolveResponse = serde_json::from_value(body).unwrap();
    assert!(response.solution_html.contains(r#"<span class="value">5.00</span>"#));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn solve_compound_interest_with_client_keys() {
    let (app, store) = app();
    let (status, body) = post_json(
        &app,
        "/api/solve",
        json!({"problemType": "compoundInterest", "inputs": {"p": 5000, "amount": 6050, "t": 2}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["solutionHtml"].as_str().unwrap().contains("10.00%"));

    let stored = store.list_all().await.unwrap();
    assert_eq!(stored[0].inputs["principal"], 5000.0);
    assert_eq!(stored[0].inputs["time"], 2.0);
}

#[tokio::test]
async fn unknown_problem_type_is_rejected_before_solving() {
    // Without templates any solve attempt would be a 500; a 400 proves the
    // type check runs first.
    let empty = tempfile::tempdir().unwrap();
    let (state, store) = state_with_templates(empty.path().to_str().unwrap());
    let app = build_router(state);

    let (status, body) = post_json(
        &app,
        "/api/solve",
        json!({"problemType": "quadratic", "inputs": {"a": 3, "b": 4}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("quadratic"));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn invalid_inputs_are_client_errors() {
    let (app, store) = app();
    for inputs in [
        json!({"a": -3, "b": 4}),
        json!({"a": 0, "b": 4}),
        json!({"a": "three", "b": 4}),
        json!({"a": null, "b": 4}),
        json!({"b": 4}),
    ] {
        let (status, body) =
            post_json(&app, "/api/solve", json!({"problemType": "pythagorean", "inputs": inputs})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
    }
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let (app, _) = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/solve")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&app, "/api/solve", json!({"inputs": {"a": 3, "b": 4}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_template_is_a_server_error() {
    let empty = tempfile::tempdir().unwrap();
    let (state, store) = state_with_templates(empty.path().to_str().unwrap());
    let app = build_router(state);

    let (status, body) = post_json(
        &app,
        "/api/solve",
        json!({"problemType": "pythagorean", "inputs": {"a": 3, "b": 4}}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("template"));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn history_is_newest_first() {
    let (app, _) = app();
    for (a, b) in [(3, 4), (5, 12), (8, 15)] {
        let (status, _) = post_json(
            &app,
            "/api/solve",
            json!({"problemType": "pythagorean", "inputs": {"a": a, "b": b}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, bytes) = get(&app, "/api/solve/history").await;
    assert_eq!(status, StatusCode::OK);
    let history: Vec<Value> = serde_json::from_slice(&bytes).unwrap();
    let firsts: Vec<f64> = history.iter().map(|r| r["inputs"]["a"].as_f64().unwrap()).collect();
    assert_eq!(firsts, vec![8.0, 5.0, 3.0]);
    assert_eq!(history[0]["problemType"], "pythagorean");
    assert!(history[0]["solutionHtml"].as_str().unwrap().contains("17.00"));
}

#[tokio::test]
async fn single_record_lookup() {
    let (app, store) = app();
    post_json(
        &app,
        "/api/solve",
        json!({"problemType": "pythagorean", "inputs": {"a": 3, "b": 4}}),
    )
    .await;
    let id = store.list_all().await.unwrap()[0].id;

    let (status, bytes) = get(&app, &format!("/api/solve/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    let record: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(record["id"], id.to_string());

    let (status, _) = get(&app, &format!("/api/solve/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn form_submission_renders_page_with_solution() {
    let (app, store) = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/solve")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("problem_type=compoundInterest&a=&b=&p=5000&amount=6050&t=2"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("solution-frame"));
    assert!(page.contains("10.00%"));
    assert!(page.contains("Compound Interest Rate"));
    assert_eq!(store.count().await.unwrap(), 1);

    let id = store.list_all().await.unwrap()[0].id;
    let (status, bytes) = get(&app, &format!("/history/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(bytes).unwrap().contains("history-item active"));
}

#[tokio::test]
async fn index_page_lists_empty_history() {
    let (app, _) = app();
    let (status, bytes) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(bytes).unwrap();
    assert!(page.contains("No history yet."));
    assert!(page.contains("Here is the solution"));
}

#[tokio::test]
async fn health_reports_solution_count() {
    let (app, _) = app();
    post_json(
        &app,
        "/api/solve",
        json!({"problemType": "pythagorean", "inputs": {"a": 1, "b": 1}}),
    )
    .await;

    let (status, bytes) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["solutions"], 1);
}

#[tokio::test]
async fn stored_solution_is_broadcast() {
    let (state, _) = state_with_templates(TEMPLATES);
    let mut rx = state.subscribe();
    let app = build_router(state);

    post_json(
        &app,
        "/api/solve",
        json!({"problemType": "pythagorean", "inputs": {"a": 3, "b": 4}}),
    )
    .await;

    match rx.try_recv().unwrap() {
        AppEvent::SolutionCreated { problem_type, .. } => {
            assert_eq!(problem_type.as_str(), "pythagorean");
        }
    }
}

/// Store whose backend is always unreachable.
struct UnavailableStore;

#[async_trait::async_trait]
impl SolutionStore for UnavailableStore {
    async fn save(&self, _record: SolutionRecord) -> stepwise_db::Result<SolutionRecord> {
        Err(DbError::InvalidRecord("database is locked".into()))
    }

    async fn list_all(&self) -> stepwise_db::Result<Vec<SolutionRecord>> {
        Err(DbError::InvalidRecord("database is locked".into()))
    }

    async fn find_by_id(&self, _id: Uuid) -> stepwise_db::Result<Option<SolutionRecord>> {
        Err(DbError::InvalidRecord("database is locked".into()))
    }

    async fn count(&self) -> stepwise_db::Result<u64> {
        Err(DbError::InvalidRecord("database is locked".into()))
    }
}

fn unavailable_app() -> Router {
    let store: SharedStore = Arc::new(UnavailableStore);
    build_router(AppState::new(Solver::new(TemplateRenderer::new(TEMPLATES)), store))
}

#[tokio::test]
async fn history_page_reports_storage_failure_as_server_error() {
    let app = unavailable_app();

    let (status, bytes) = get(&app, &format!("/history/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let page = String::from_utf8(bytes).unwrap();
    assert!(page.contains("database is locked"));
    assert!(!page.contains("No solution with id"));

    // the form page still renders with an empty sidebar
    let (status, bytes) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(bytes).unwrap().contains("No history yet."));
}

#[tokio::test]
async fn api_reports_storage_failure_as_server_error() {
    let app = unavailable_app();

    let (status, body) = post_json(
        &app,
        "/api/solve",
        json!({"problemType": "pythagorean", "inputs": {"a": 3, "b": 4}}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");

    let (status, _) = get(&app, "/api/solve/history").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_history_id_is_not_found() {
    let (app, _) = app();
    let (status, bytes) = get(&app, &format!("/history/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(String::from_utf8(bytes).unwrap().contains("No solution with id"));
}

#[tokio::test]
async fn event_stream_is_served() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::builder().uri("/api/events").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));
}
