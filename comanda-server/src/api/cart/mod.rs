//! Cart API
//!
//! | Path | Method | Behavior |
//! |------|--------|----------|
//! | /api/cart | GET | current cart |
//! | /api/cart/items | POST | compose and add one line |
//! | /api/cart/items/{index} | DELETE | remove one line |
//! | /api/cart/send | POST | send to the tab, print, clear |

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_cart))
        .route("/items", post(handler::add_item))
        .route("/items/{index}", delete(handler::remove_item))
        .route("/send", post(handler::send))
        .layer(middleware::from_fn(require_permission(Permission::PlaceOrder)))
}
