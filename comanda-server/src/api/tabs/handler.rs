//! Tabs API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{Tab, TabStatus};

use crate::auth::CurrentSession;
use crate::core::ServerState;
use crate::tabs::{PaymentOutcome, queue_for};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Defaults to the caller's queue (`novo` for the cashier, `pago` for the kitchen)
    pub status: Option<TabStatus>,
}

/// GET /api/tabs
pub async fn list(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentSession>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Tab>>> {
    let status = query
        .status
        .or_else(|| queue_for(current.role))
        .unwrap_or(TabStatus::New);
    Ok(Json(state.tabs.queue(status)?))
}

/// GET /api/tabs/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Tab>> {
    Ok(Json(state.tabs.get(&id)?))
}

/// POST /api/tabs/:id/pay - "Marcar como Pago"
pub async fn pay(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> AppResult<Json<PaymentOutcome>> {
    let outcome = state.tabs.confirm_payment(&id, current.role).await?;
    Ok(Json(outcome))
}

/// POST /api/tabs/:id/ready - "Marcar como Pronto"
pub async fn ready(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> AppResult<Json<Tab>> {
    Ok(Json(state.tabs.mark_ready(&id, current.role).await?))
}
