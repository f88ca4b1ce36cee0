//! Tabs API
//!
//! | Path | Method | Behavior |
//! |------|--------|----------|
//! | /api/tabs?status= | GET | tabs of a status, oldest first |
//! | /api/tabs/{id} | GET | one tab |
//! | /api/tabs/{id}/pay | POST | `novo -> pago`, prints the payment ticket |
//! | /api/tabs/{id}/ready | POST | `pago -> pronto` |
//!
//! Transitions are role-checked by the status machine.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tabs", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/pay", post(handler::pay))
        .route("/{id}/ready", post(handler::ready))
}
