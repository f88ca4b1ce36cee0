//! Daily Report API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{DailyReport, DailyReportQuery};

use crate::core::ServerState;
use crate::tabs::daily_report;
use crate::utils::AppResult;
use crate::utils::time::{parse_date, today};

/// GET /api/reports/daily?date=YYYY-MM-DD - today when no date is given
pub async fn by_query(
    State(state): State<ServerState>,
    Query(query): Query<DailyReportQuery>,
) -> AppResult<Json<DailyReport>> {
    let date = match query.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => today(state.config.timezone),
    };
    Ok(Json(daily_report(&state.store, date, state.config.timezone)?))
}

/// GET /api/reports/daily/:date
pub async fn by_date(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> AppResult<Json<DailyReport>> {
    let date = parse_date(&date)?;
    Ok(Json(daily_report(&state.store, date, state.config.timezone)?))
}
