//! Catalog API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/catalog | GET | session |

use axum::{Json, Router, extract::State, routing::get};

use crate::catalog::Catalog;
use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/catalog", get(get_catalog))
}

/// Available products and every option
async fn get_catalog(State(state): State<ServerState>) -> AppResult<Json<Catalog>> {
    Ok(Json(state.catalog.load()?))
}
