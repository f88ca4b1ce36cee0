//! Cupom endpoint
//!
//! `GET /imprimir/pedido/{id}` answers plain text for the counter printer
//! script: the two-section cupom, or 404 `Pedido nao encontrado!`. No
//! session required.

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::core::ServerState;
use crate::utils::AppResult;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

pub fn router() -> Router<ServerState> {
    Router::new().route("/imprimir/pedido/{id}", get(print_tab))
}

async fn print_tab(State(state): State<ServerState>, Path(id): Path<String>) -> AppResult<Response> {
    let Some(tab) = state.store.get_tab(&id)? else {
        tracing::debug!(tab_id = %id, "Cupom requested for unknown tab");
        return Ok((
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, TEXT_PLAIN)],
            "Pedido nao encontrado!",
        )
            .into_response());
    };

    let text = state.print.renderer().render_cupom(&tab);
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], text).into_response())
}
