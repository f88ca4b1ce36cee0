//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// - /api/auth/login: public
/// - /api/auth/me, /api/auth/logout: session required (global require_auth)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/me", get(handler::me))
        .route("/api/auth/logout", post(handler::logout))
}
