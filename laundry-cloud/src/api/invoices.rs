//! Invoices of one business date (read only)

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::Invoice;

use crate::services;
use crate::state::AppState;
use crate::time;

use super::ApiResult;

#[derive(Debug, Deserialize)]
pub struct InvoicesQuery {
    /// Business date (YYYY-MM-DD)
    pub date: String,
}

/// GET /api/invoices?date=
pub async fn list_for_date(
    State(state): State<AppState>,
    Query(query): Query<InvoicesQuery>,
) -> ApiResult<Vec<Invoice>> {
    let date = time::parse_date("date", &query.date)?;
    let invoices = services::closure::invoices_for_date(&state, date).await?;
    Ok(Json(invoices))
}
