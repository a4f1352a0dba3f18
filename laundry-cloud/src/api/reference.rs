//! Reference lists used to resolve invoice codes to display names

use axum::{Json, extract::State};
use shared::models::{Employee, PaymentMethod};

use crate::db;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/payment-methods
pub async fn list_payment_methods(State(state): State<AppState>) -> ApiResult<Vec<PaymentMethod>> {
    Ok(Json(db::payment_methods::list_all(&state.pool).await?))
}

/// GET /api/employees
pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    Ok(Json(db::employees::list_all(&state.pool).await?))
}
