//! Integration tests for the remote evaluator
//!
//! A local axum server stands in for the chat-completion service

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use truthorb::config::RemoteConfig;
use truthorb::core::{RemoteEvaluator, StatementEvaluator};
use truthorb::error::RemoteFailure;
use truthorb::types::Statement;

const API_KEY: &str = "test-key";

async fn spawn_service(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api/v1/chat/completions", addr)
}

fn reply(content: &str) -> Value {
    json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] })
}

fn evaluator(endpoint: String, timeout_ms: u64) -> RemoteEvaluator {
    RemoteEvaluator::new(RemoteConfig {
        endpoint,
        api_key: Some(API_KEY.to_string()),
        timeout_ms,
        ..RemoteConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_marker_reply() {
    let router = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async { Json(reply("The orb sees clearly. Truth Index: 91%")) }),
    );
    let remote = evaluator(spawn_service(router).await, 2000);

    let result = remote.evaluate(&Statement::new("The sky is blue")).await.unwrap();
    assert_eq!(result.truth_index, 91);
    assert_eq!(result.narration_text, "The orb sees clearly.");
}

#[tokio::test]
async fn test_reply_without_marker_is_neutral() {
    let text = "The mists conceal the answer from even my ancient eyes.";
    let router = Router::new().route(
        "/api/v1/chat/completions",
        post(move || async move { Json(reply(text)) }),
    );
    let remote = evaluator(spawn_service(router).await, 2000);

    let result = remote.evaluate(&Statement::new("I own a boat")).await.unwrap();
    assert_eq!(result.truth_index, 50);
    assert_eq!(result.narration_text, text);
}

#[tokio::test]
async fn test_request_shape_and_headers() {
    async fn handler(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer test-key");
        let titled = headers
            .get("x-title")
            .and_then(|v| v.to_str().ok())
            == Some("Mystic Lie Detector Orb");
        if !authorized || !titled {
            return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
        }

        let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
        let ok = body["model"].is_string()
            && body["max_tokens"] == 200
            && body["messages"][0]["role"] == "user"
            && prompt.contains("\"I can fly\"");
        let content = if ok { "Truth Index: 7%" } else { "Truth Index: 99%" };
        Json(reply(content)).into_response()
    }

    let router = Router::new().route("/api/v1/chat/completions", post(handler));
    let remote = evaluator(spawn_service(router).await, 2000);

    let result = remote.evaluate(&Statement::new("I can fly")).await.unwrap();
    assert_eq!(result.truth_index, 7);
}

#[tokio::test]
async fn test_server_error_status() {
    let router = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let remote = evaluator(spawn_service(router).await, 2000);

    let outcome = remote.evaluate(&Statement::new("hello")).await;
    assert_eq!(outcome, Err(RemoteFailure::HttpError(500)));
}

#[tokio::test]
async fn test_malformed_body() {
    let router = Router::new()
        .route("/api/v1/chat/completions", post(|| async { "not json at all" }));
    let remote = evaluator(spawn_service(router).await, 2000);

    let outcome = remote.evaluate(&Statement::new("hello")).await;
    assert!(matches!(outcome, Err(RemoteFailure::ParseError(_))));
}

#[tokio::test]
async fn test_empty_choices() {
    let router = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async { Json(json!({ "choices": [] })) }),
    );
    let remote = evaluator(spawn_service(router).await, 2000);

    let outcome = remote.evaluate(&Statement::new("hello")).await;
    assert!(matches!(outcome, Err(RemoteFailure::ParseError(_))));
}

#[tokio::test]
async fn test_hanging_service_times_out() {
    let router = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(reply("Truth Index: 80%"))
        }),
    );
    let remote = evaluator(spawn_service(router).await, 200);

    let started = Instant::now();
    let outcome = remote.evaluate(&Statement::new("hello")).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, Err(RemoteFailure::Timeout(Duration::from_millis(200))));
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_secs(5), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_unreachable_service() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let remote = evaluator(format!("http://{}/api/v1/chat/completions", addr), 2000);
    let outcome = remote.evaluate(&Statement::new("hello")).await;
    assert!(matches!(outcome, Err(RemoteFailure::Network(_))));
}
