//! Authentication
//!
//! Sessions are opaque tokens handed out at login and sent back as
//! `Authorization: Bearer <token>`:
//! - [`CurrentSession`]: the caller's session
//! - [`require_auth`]: resolves the token for every `/api/` route
//! - [`require_permission`]: role gate per route group

pub mod extractor;
pub mod middleware;

pub use extractor::CurrentSession;
pub use middleware::{require_auth, require_permission};

/// Token from an `Authorization` header value
pub fn extract_bearer(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
