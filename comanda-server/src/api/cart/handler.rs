//! Cart API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::ErrorCode;
use shared::models::{AddCartItem, CartLine};

use crate::AppError;
use crate::auth::CurrentSession;
use crate::core::ServerState;
use crate::session::{Session, compose_line};
use crate::tabs::SendOutcome;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}

impl From<&Session> for CartView {
    fn from(session: &Session) -> Self {
        Self {
            lines: session.cart.clone(),
            total: session.cart_total(),
        }
    }
}

/// GET /api/cart
pub async fn get_cart(Extension(current): Extension<CurrentSession>) -> Json<CartView> {
    let session = current.handle.lock();
    Json(CartView::from(&*session))
}

/// POST /api/cart/items - compose a product with its options
pub async fn add_item(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentSession>,
    Json(payload): Json<AddCartItem>,
) -> AppResult<Json<CartView>> {
    let catalog = state.catalog.load()?;
    let line = compose_line(&catalog, &payload)?;
    tracing::debug!(username = %current.username, item = %line.name, "Cart line added");

    let mut session = current.handle.lock();
    session.add_line(line);
    Ok(Json(CartView::from(&*session)))
}

/// DELETE /api/cart/items/:index
pub async fn remove_item(
    Extension(current): Extension<CurrentSession>,
    Path(index): Path<usize>,
) -> AppResult<Json<CartView>> {
    let mut session = current.handle.lock();
    session.remove_line(index)?;
    Ok(Json(CartView::from(&*session)))
}

/// POST /api/cart/send - add the cart to the tab and print the kitchen ticket
///
/// The cart is cleared on success and restored on failure.
pub async fn send(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentSession>,
) -> AppResult<Json<SendOutcome>> {
    let (lines, (identifier, identifier_type)) = {
        let mut session = current.handle.lock();
        if session.cart.is_empty() {
            return Err(AppError::new(ErrorCode::TabEmpty));
        }
        (session.take_cart(), session.destination())
    };

    let result = state
        .tabs
        .send_order(&identifier, identifier_type, &current.username, &lines)
        .await;

    let mut session = current.handle.lock();
    match result {
        Ok(outcome) => {
            session.clear_editing();
            Ok(Json(outcome))
        }
        Err(e) => {
            session.restore_cart(lines);
            Err(e)
        }
    }
}
