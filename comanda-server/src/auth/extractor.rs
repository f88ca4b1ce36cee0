//! Session extractor

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::models::Role;

use crate::{AppError, AppResult};
use crate::core::ServerState;
use crate::security_log;
use crate::session::SessionHandle;

use super::extract_bearer;

/// The caller's session
///
/// Inserted into request extensions by [`super::require_auth`]; also usable
/// directly as an extractor.
#[derive(Clone)]
pub struct CurrentSession {
    pub token: String,
    pub username: String,
    pub role: Role,
    pub handle: SessionHandle,
}

impl CurrentSession {
    /// Resolve a token against the registry, refreshing its idle clock
    pub fn resolve(state: &ServerState, token: &str) -> AppResult<Self> {
        let handle = state.sessions.touch(token)?;
        let (username, role) = {
            let session = handle.lock();
            (session.username.clone(), session.role)
        };
        Ok(Self {
            token: token.to_string(),
            username,
            role,
            handle,
        })
    }
}

impl FromRequestParts<ServerState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<CurrentSession>() {
            return Ok(session.clone());
        }

        let token = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(extract_bearer)
            .ok_or_else(|| {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                AppError::not_authenticated()
            })?;

        let session = CurrentSession::resolve(state, token).inspect_err(|e| {
            security_log!(
                "WARN",
                "auth_failed",
                uri = format!("{:?}", parts.uri),
                reason = e.code.message()
            );
        })?;
        parts.extensions.insert(session.clone());
        Ok(session)
    }
}
