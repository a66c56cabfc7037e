//! Report routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use clinic_core::BillingError;
use clinic_shared::types::{ClinicId, YearMonth};
use serde::Deserialize;

use crate::AppState;
use crate::error::billing_error_response;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/clinics/{clinic_id}/reports/monthly",
        get(get_monthly_summary),
    )
}

/// Query parameters for the monthly summary.
#[derive(Debug, Deserialize)]
pub struct MonthlySummaryQuery {
    /// Month as `YYYY-MM`.
    pub month: String,
}

/// GET `/clinics/{clinic_id}/reports/monthly?month=YYYY-MM` - Monthly summary.
async fn get_monthly_summary(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
    Query(query): Query<MonthlySummaryQuery>,
) -> impl IntoResponse {
    let month = match query.month.parse::<YearMonth>() {
        Ok(month) => month,
        Err(e) => return billing_error_response(BillingError::from(e)),
    };

    match state.engine.reports.monthly_summary(clinic_id, month).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => billing_error_response(e),
    }
}
