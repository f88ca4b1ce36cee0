//! API routes
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - login, current session, logout
//! - [`catalog`] - menu
//! - [`screen`] - role screen
//! - [`session`] - order target and tab editing
//! - [`cart`] - cart and send
//! - [`tabs`] - queues and status transitions
//! - [`daily_reports`] - daily summary
//! - [`cupom`] - plain-text cupom for the counter printer

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod cupom;
pub mod daily_reports;
pub mod health;
pub mod screen;
pub mod session;
pub mod tabs;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::ServerState;
use crate::utils::AppError;

pub use crate::utils::AppResult;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Unknown routes answer with the JSON error envelope
async fn not_found(uri: http::Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(catalog::router())
        .merge(screen::router())
        .merge(session::router())
        .merge(cart::router())
        .merge(tabs::router())
        .merge(daily_reports::router())
        .merge(cupom::router())
        .fallback(not_found)
}

/// Full application with state and middleware
///
/// `require_auth` runs on every route and skips the public ones itself.
pub fn build_router(state: ServerState) -> Router {
    build_app()
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(log_request))
                .layer(CorsLayer::permissive()),
        )
}
