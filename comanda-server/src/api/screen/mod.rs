//! Role screen API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/screen | GET | session |

use axum::{Extension, Json, Router, extract::State, routing::get};

use crate::auth::CurrentSession;
use crate::core::ServerState;
use crate::session::{RoleScreen, Screen, ScreenContext, ScreenView};
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/screen", get(get_screen))
}

/// The screen for the caller's role
async fn get_screen(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentSession>,
) -> AppResult<Json<ScreenView>> {
    let catalog = state.catalog.load()?;
    let ctx = ScreenContext {
        catalog: &catalog,
        tabs: &state.tabs,
    };
    let session = current.handle.lock();
    let view = RoleScreen::from(session.role).render(&session, &ctx)?;
    Ok(Json(view))
}
