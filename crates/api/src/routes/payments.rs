//! Payment routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use clinic_core::ledger::{PaymentMethod, PaymentStatus};
use clinic_core::payment::{CreatePaymentInput, PaymentFilter, UpdatePaymentInput};
use clinic_shared::types::{AppointmentId, ClinicId, PatientId, PaymentId, UserId};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{day_range, page_request};
use crate::AppState;
use crate::error::{billing_error_response, not_found};

/// Creates the payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clinics/{clinic_id}/payments",
            post(create_payment).get(list_payments),
        )
        .route(
            "/payments/{payment_id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    /// Appointment whose invoice is settled.
    pub appointment_id: AppointmentId,
    /// Amount collected.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
    /// Staff user recording the payment.
    pub created_by: UserId,
}

/// Query parameters for listing payments.
#[derive(Debug, Default, Deserialize)]
pub struct ListPaymentsQuery {
    /// Restrict to one patient.
    pub patient_id: Option<PatientId>,
    /// Restrict to one appointment.
    pub appointment_id: Option<AppointmentId>,
    /// Restrict to one status.
    pub status: Option<PaymentStatus>,
    /// First day included.
    pub date_from: Option<NaiveDate>,
    /// Last day included.
    pub date_to: Option<NaiveDate>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub page_size: Option<u32>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/clinics/{clinic_id}/payments` - Record the payment of an appointment.
async fn create_payment(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
    Json(payload): Json<CreatePaymentRequest>,
) -> impl IntoResponse {
    let input = CreatePaymentInput {
        clinic_id,
        appointment_id: payload.appointment_id,
        amount: payload.amount,
        method: payload.method,
        created_by: payload.created_by,
    };

    match state.engine.payments.create_payment(input).await {
        Ok(payment) => (StatusCode::CREATED, Json(payment)).into_response(),
        Err(e) => billing_error_response(e),
    }
}

/// GET `/clinics/{clinic_id}/payments` - List payments, newest first.
async fn list_payments(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
    Query(query): Query<ListPaymentsQuery>,
) -> impl IntoResponse {
    let filter = PaymentFilter {
        patient_id: query.patient_id,
        appointment_id: query.appointment_id,
        status: query.status,
        days: day_range(query.date_from, query.date_to),
    };

    match state
        .engine
        .payments
        .list_payments(clinic_id, filter, page_request(query.page, query.page_size))
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => billing_error_response(e),
    }
}

/// GET `/payments/{payment_id}` - Get one payment.
async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<PaymentId>,
) -> impl IntoResponse {
    match state.engine.payments.get_payment(payment_id).await {
        Ok(Some(payment)) => (StatusCode::OK, Json(payment)).into_response(),
        Ok(None) => not_found("Payment not found"),
        Err(e) => billing_error_response(e),
    }
}

/// PUT `/payments/{payment_id}` - Edit amount and/or method.
async fn update_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<PaymentId>,
    Json(payload): Json<UpdatePaymentInput>,
) -> impl IntoResponse {
    match state.engine.payments.update_payment(payment_id, payload).await {
        Ok(payment) => (StatusCode::OK, Json(payment)).into_response(),
        Err(e) => billing_error_response(e),
    }
}

/// DELETE `/payments/{payment_id}` - Remove a payment and reopen its invoice.
async fn delete_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<PaymentId>,
) -> impl IntoResponse {
    match state.engine.payments.delete_payment(payment_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => billing_error_response(e),
    }
}
