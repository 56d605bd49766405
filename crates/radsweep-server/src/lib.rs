//! HTTP transport for the radsweep pipeline.

use axum::routing::post;
use axum::Router;

pub mod handlers;
pub mod state;

pub use state::AppState;

/// Builds the API router (without the static asset fallback).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/run-model", post(handlers::run_model_handler))
        .route("/run-sweep", post(handlers::run_sweep_handler))
        .with_state(state)
}
