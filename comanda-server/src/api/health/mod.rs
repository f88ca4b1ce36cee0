//! Health check
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /health | GET | none |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// A printer is configured
    printer: bool,
    sessions: usize,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        printer: state.print.has_printer(),
        sessions: state.sessions.len(),
    })
}
