//! Session API: order target and tab being edited

mod handler;

use axum::{
    Router, middleware,
    routing::{post, put},
};
use shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/session", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/target", put(handler::set_target))
        .route("/editing/{id}", post(handler::begin_editing))
        .route("/editing", axum::routing::delete(handler::cancel_editing))
        .layer(middleware::from_fn(require_permission(Permission::PlaceOrder)))
}
