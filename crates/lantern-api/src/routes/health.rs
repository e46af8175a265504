//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status: `ok` or `degraded`.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Chat API reachability.
    pub chat: String,
    /// Game-runner reachability.
    pub zmachine: String,
}

fn reachability(ok: bool) -> String {
    if ok { "ok" } else { "unreachable" }.to_string()
}

/// GET /health — probes both upstream dependencies.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let chat_ok = state.chat.own_identity().await.is_ok();
    let zmachine_ok = state.runner.list_games().await.is_ok();

    Json(HealthResponse {
        status: if chat_ok && zmachine_ok { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        chat: reachability(chat_ok),
        zmachine: reachability(zmachine_ok),
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
