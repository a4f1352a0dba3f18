//! API routes for laundry-cloud

pub mod cash_closures;
pub mod daily_summary;
pub mod health;
pub mod invoices;
pub mod reference;

use axum::Router;
use axum::http::Request;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::error::ServiceError;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, ServiceError>;

/// Create the router with tracing, request-id and CORS layers
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/daily-summary/{date}", get(daily_summary::get_daily_summary))
        .route(
            "/api/cash-closures",
            get(cash_closures::list).post(cash_closures::create),
        )
        .route("/api/cash-closures/{date}", get(cash_closures::get_by_date))
        .route("/api/invoices", get(invoices::list_for_date))
        .route("/api/payment-methods", get(reference::list_payment_methods))
        .route("/api/employees", get(reference::list_employees));

    let http_layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<axum::body::Body>| {
                let request_id = req
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api)
        .with_state(state)
        .layer(http_layers)
        .layer(CorsLayer::permissive())
}
