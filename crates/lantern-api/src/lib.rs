//! Lantern API server library.
//!
//! Exposed as a library so integration tests can assemble the same router
//! the binary serves.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Assembles the full application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::voice::router())
        .merge(routes::chat::router())
        .with_state(state)
}
