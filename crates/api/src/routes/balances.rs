//! Patient balance and history routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use clinic_core::balance::BalanceQuery;
use clinic_shared::types::{ClinicId, PatientId};
use serde::Deserialize;

use super::page_request;
use crate::AppState;
use crate::error::billing_error_response;

/// Creates the balance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clinics/{clinic_id}/balances", get(list_balances))
        .route(
            "/clinics/{clinic_id}/patients/{patient_id}/history",
            get(get_payment_history),
        )
}

/// Query parameters for patient balances.
#[derive(Debug, Default, Deserialize)]
pub struct ListBalancesQuery {
    /// Name or phone substring.
    pub query: Option<String>,
    /// Only patients who owe money.
    #[serde(default)]
    pub only_with_balance: bool,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub page_size: Option<u32>,
}

/// GET `/clinics/{clinic_id}/balances` - Per-patient balances, most recent visit first.
async fn list_balances(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
    Query(query): Query<ListBalancesQuery>,
) -> impl IntoResponse {
    let balance_query = BalanceQuery {
        query: query.query,
        only_with_balance: query.only_with_balance,
    };

    match state
        .engine
        .balances
        .patient_balances(
            clinic_id,
            &balance_query,
            page_request(query.page, query.page_size),
        )
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => billing_error_response(e),
    }
}

/// GET `/clinics/{clinic_id}/patients/{patient_id}/history` - Payments and unpaid charges.
async fn get_payment_history(
    State(state): State<AppState>,
    Path((clinic_id, patient_id)): Path<(ClinicId, PatientId)>,
) -> impl IntoResponse {
    match state
        .engine
        .balances
        .patient_payment_history(clinic_id, patient_id)
        .await
    {
        Ok(history) => (StatusCode::OK, Json(history)).into_response(),
        Err(e) => billing_error_response(e),
    }
}
