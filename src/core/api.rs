//! HTTP API for the Truth Orb
//!
//! Endpoints:
//! - POST /evaluate - Judge one statement
//! - GET /health - Health check

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::core::{ResponseComposer, RemoteEvaluator, TruthEngine};
use crate::types::{Statement, Verdict};

pub type ApiEngine = TruthEngine<RemoteEvaluator, StdRng>;

/// App state
pub struct AppState {
    /// One evaluation in flight at a time
    pub engine: Mutex<ApiEngine>,
    pub composer: ResponseComposer,
    /// Fixed at startup; read without taking the engine lock
    pub remote_enabled: bool,
}

/// Evaluate request
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub statement: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub remote_enabled: bool,
}

/// Create the API router
pub fn create_router(engine: ApiEngine) -> Router {
    let state = Arc::new(AppState {
        remote_enabled: engine.has_remote(),
        engine: Mutex::new(engine),
        composer: ResponseComposer::new(),
    });

    Router::new()
        .route("/health", get(health))
        .route("/evaluate", post(evaluate))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        remote_enabled: state.remote_enabled,
    })
}

/// Evaluate one statement. Never fails: the heuristic covers every input.
async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EvaluateRequest>,
) -> Json<Verdict> {
    let statement = Statement::new(req.statement);
    let evaluation = {
        let mut engine = state.engine.lock().await;
        engine.evaluate_guarded(&statement).await
    };

    let payload = state.composer.compose(&evaluation.result);
    let verdict = Verdict::new(
        statement,
        &evaluation.result,
        evaluation.source,
        evaluation.rule,
        payload,
    );
    info!(truth_index = verdict.truth_index, source = %verdict.source, "api verdict");
    Json(verdict)
}

/// Run the API server
pub async fn run_server(addr: &str, engine: ApiEngine) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(engine);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("🔮 Truth Orb API running on {}", addr);
    println!("  POST /evaluate  - Judge a statement");
    println!("  GET  /health    - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
