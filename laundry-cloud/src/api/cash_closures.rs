//! Cash closure endpoints: create (once per date), lookup by date, list

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{CashClosure, CashClosureCreate};

use crate::closure::{ClosureError, ClosureInput};
use crate::db;
use crate::error::ServiceError;
use crate::services;
use crate::state::AppState;
use crate::time;
use crate::validation::page_bounds;

use super::ApiResult;

/// GET /api/cash-closures query
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Inclusive lower bound (YYYY-MM-DD)
    pub from: Option<String>,
    /// Inclusive upper bound (YYYY-MM-DD)
    pub to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/cash-closures
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CashClosureCreate>,
) -> Result<(StatusCode, Json<CashClosure>), ServiceError> {
    let today = time::business_today(state.timezone);
    let input = ClosureInput::from_request(&payload, today)?;

    let closure = services::closure::create_cash_closure(&state, input).await?;
    Ok((StatusCode::CREATED, Json(closure)))
}

/// GET /api/cash-closures/{date}
pub async fn get_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<CashClosure> {
    let date = time::parse_date("date", &date)?;
    let closure = db::cash_closures::find_by_date(&state.pool, date)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CashClosureNotFound,
                format!("No cash closure for {date}"),
            )
            .with_detail("closing_date", date.to_string())
        })?;
    Ok(Json(closure))
}

/// GET /api/cash-closures
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<CashClosure>> {
    let from = query
        .from
        .as_deref()
        .map(|d| time::parse_date("from", d))
        .transpose()?;
    let to = query
        .to
        .as_deref()
        .map(|d| time::parse_date("to", d))
        .transpose()?;
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Err(ClosureError::Validation {
            field: "from".to_string(),
            message: format!("must not be after to ({from} > {to})"),
        }
        .into());
    }

    let (limit, offset) = page_bounds(query.limit, query.offset);
    let closures = db::cash_closures::list(&state.pool, from, to, limit, offset).await?;
    Ok(Json(closures))
}
