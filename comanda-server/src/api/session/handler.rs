//! Session API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::models::SetTarget;

use crate::auth::CurrentSession;
use crate::core::ServerState;
use crate::session::Session;
use crate::utils::AppResult;

/// PUT /api/session/target - table number or client name
pub async fn set_target(
    Extension(current): Extension<CurrentSession>,
    Json(payload): Json<SetTarget>,
) -> AppResult<Json<Session>> {
    let mut session = current.handle.lock();
    session.set_target(payload.target)?;
    Ok(Json(session.clone()))
}

/// POST /api/session/editing/:id - send the next cart to this open tab
pub async fn begin_editing(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> AppResult<Json<Session>> {
    let tab = state.tabs.get(&id)?;
    let mut session = current.handle.lock();
    session.begin_editing(&tab)?;
    Ok(Json(session.clone()))
}

/// DELETE /api/session/editing - back to the chosen target
pub async fn cancel_editing(Extension(current): Extension<CurrentSession>) -> Json<Session> {
    let mut session = current.handle.lock();
    session.clear_editing();
    Json(session.clone())
}
