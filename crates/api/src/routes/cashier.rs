//! Daily cashier route.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use clinic_shared::types::ClinicId;
use serde::Deserialize;
use serde_json::json;

use crate::AppState;
use crate::error::billing_error_response;

/// Creates the cashier routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/clinics/{clinic_id}/cashier", get(get_cashier_rows))
}

/// Query parameters for the cashier view.
#[derive(Debug, Default, Deserialize)]
pub struct CashierQuery {
    /// Day to show (defaults to today, UTC).
    pub date: Option<NaiveDate>,
}

/// GET `/clinics/{clinic_id}/cashier` - Payments and unpaid charges of one day.
async fn get_cashier_rows(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
    Query(query): Query<CashierQuery>,
) -> impl IntoResponse {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    match state.engine.cashier.cashier_rows(clinic_id, date).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(json!({ "date": date, "rows": rows })),
        )
            .into_response(),
        Err(e) => billing_error_response(e),
    }
}
