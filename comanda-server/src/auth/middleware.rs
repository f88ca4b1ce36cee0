//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::models::Permission;

use crate::AppError;
use crate::auth::{CurrentSession, extract_bearer};
use crate::core::ServerState;
use crate::security_log;

/// Resolve the session token for `/api/` routes
///
/// Inserts [`CurrentSession`] into the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (`/health`, `/imprimir/...`)
/// - `/api/auth/login`
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if !path.starts_with("/api/") || path == "/api/auth/login" {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer);

    let Some(token) = token else {
        security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
        return Err(AppError::not_authenticated());
    };

    match CurrentSession::resolve(&state, token) {
        Ok(session) => {
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                uri = format!("{:?}", req.uri()),
                reason = e.code.message()
            );
            Err(e)
        }
    }
}

/// Require a role permission
///
/// ```ignore
/// Router::new()
///     .route("/api/cart/send", post(handler::send))
///     .layer(middleware::from_fn(require_permission(Permission::PlaceOrder)));
/// ```
///
/// Missing session → 401, role without the permission → 403.
pub fn require_permission(
    permission: Permission,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let session = req
                .extensions()
                .get::<CurrentSession>()
                .ok_or_else(AppError::not_authenticated)?;

            if !session.role.can(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    username = session.username.clone(),
                    role = session.role.as_str(),
                    required_permission = format!("{:?}", permission)
                );
                return Err(AppError::permission_denied(format!(
                    "Role '{}' is not allowed to do this",
                    session.role
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
