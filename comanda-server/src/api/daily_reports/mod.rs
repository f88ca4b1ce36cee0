//! Daily Report API

mod handler;

use axum::{Router, middleware, routing::get};
use shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports/daily", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::by_query))
        .route("/{date}", get(handler::by_date))
        .layer(middleware::from_fn(require_permission(Permission::ViewReports)))
}
