//! Authentication Handlers

use axum::{Extension, Json, extract::State};
use shared::error::ApiResponse;
use shared::models::{LoginRequest, LoginResponse};

use crate::AppError;
use crate::auth::CurrentSession;
use crate::core::ServerState;
use crate::session::Session;

/// Check credentials against `usuarios` and open a session
///
/// Passwords are compared as stored.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .store
        .find_user_by_username(req.username.trim())?
        .filter(|user| user.password == req.password);

    let Some(user) = user else {
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    };

    let token = state.sessions.create(&user);
    tracing::info!(username = %user.username, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        role: user.role,
    }))
}

/// Current session state
pub async fn me(Extension(session): Extension<CurrentSession>) -> Json<Session> {
    Json(session.handle.lock().clone())
}

/// Drop the session; its cart is discarded
pub async fn logout(
    State(state): State<ServerState>,
    Extension(session): Extension<CurrentSession>,
) -> ApiResponse<()> {
    state.sessions.remove(&session.token);
    tracing::info!(username = %session.username, "User logged out");
    ApiResponse::ok()
}
