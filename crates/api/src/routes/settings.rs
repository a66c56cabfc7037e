//! Clinic settings routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use clinic_core::settings::{AccountingSettingsPatch, IntegrationSettingsPatch};
use clinic_shared::types::ClinicId;

use crate::AppState;
use crate::error::billing_error_response;

/// Creates the settings routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clinics/{clinic_id}/settings/accounting",
            get(get_accounting).put(update_accounting),
        )
        .route(
            "/clinics/{clinic_id}/settings/integrations",
            get(get_integrations).put(update_integrations),
        )
}

async fn get_accounting(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
) -> impl IntoResponse {
    match state.engine.settings.accounting_settings(clinic_id).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => billing_error_response(e),
    }
}

async fn update_accounting(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
    Json(patch): Json<AccountingSettingsPatch>,
) -> impl IntoResponse {
    match state
        .engine
        .settings
        .update_accounting_settings(clinic_id, patch)
        .await
    {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => billing_error_response(e),
    }
}

async fn get_integrations(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
) -> impl IntoResponse {
    match state.engine.settings.integration_settings(clinic_id).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => billing_error_response(e),
    }
}

async fn update_integrations(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
    Json(patch): Json<IntegrationSettingsPatch>,
) -> impl IntoResponse {
    match state
        .engine
        .settings
        .update_integration_settings(clinic_id, patch)
        .await
    {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => billing_error_response(e),
    }
}
