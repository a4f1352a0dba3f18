//! Daily summary preview (before the day is closed)

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::DailySummaryPreview;

use crate::closure::{money, parse_amount};
use crate::services;
use crate::state::AppState;
use crate::time;
use crate::validation::validate_cash_amount;

use super::ApiResult;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Decimal string, defaults to 0
    pub opening_cash: Option<String>,
}

/// GET /api/daily-summary/{date}
pub async fn get_daily_summary(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<DailySummaryPreview> {
    let date = time::parse_date("date", &date)?;
    let opening_cash = match query.opening_cash.as_deref() {
        Some(raw) => parse_amount("opening_cash", raw)?,
        None => Decimal::ZERO,
    };
    validate_cash_amount(opening_cash, "opening_cash")?;

    let (summary, system_cash) =
        services::closure::daily_summary(&state, date, opening_cash).await?;

    Ok(Json(DailySummaryPreview {
        summary,
        opening_cash: money(opening_cash),
        system_cash,
    }))
}
