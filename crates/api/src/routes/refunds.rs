//! Refund routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use clinic_core::ledger::PaymentMethod;
use clinic_core::refund::{CreateRefundInput, RefundFilter};
use clinic_shared::types::{ClinicId, InvoiceId, UserId};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use super::{day_range, page_request};
use crate::AppState;
use crate::error::{billing_error_response, not_found};

/// Creates the refund routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/invoices/{invoice_id}/refund-summary",
            get(get_refund_summary),
        )
        .route(
            "/clinics/{clinic_id}/invoices/{invoice_id}/refunds",
            get(list_invoice_refunds).post(create_refund),
        )
        .route("/clinics/{clinic_id}/refunds", get(list_refunds))
}

/// Request body for issuing a refund.
#[derive(Debug, Deserialize)]
pub struct CreateRefundRequest {
    /// Amount to return.
    pub amount: Decimal,
    /// How the money is returned.
    pub method: PaymentMethod,
    /// Optional reason.
    pub reason: Option<String>,
    /// Optional proof reference.
    pub proof: Option<String>,
    /// Staff user issuing the refund.
    pub created_by: UserId,
}

/// Query parameters for listing refunds of a clinic.
#[derive(Debug, Default, Deserialize)]
pub struct ListRefundsQuery {
    /// First day included.
    pub date_from: Option<NaiveDate>,
    /// Last day included.
    pub date_to: Option<NaiveDate>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub page_size: Option<u32>,
}

/// GET `/invoices/{invoice_id}/refund-summary` - Total, paid, refunded and refundable amounts.
async fn get_refund_summary(
    State(state): State<AppState>,
    Path(invoice_id): Path<InvoiceId>,
) -> impl IntoResponse {
    match state.engine.refunds.invoice_refund_summary(invoice_id).await {
        Ok(Some(summary)) => (StatusCode::OK, Json(summary)).into_response(),
        Ok(None) => not_found("Invoice not found"),
        Err(e) => billing_error_response(e),
    }
}

/// GET `/clinics/{clinic_id}/invoices/{invoice_id}/refunds` - Refunds of one invoice, newest first.
async fn list_invoice_refunds(
    State(state): State<AppState>,
    Path((clinic_id, invoice_id)): Path<(ClinicId, InvoiceId)>,
) -> impl IntoResponse {
    match state.engine.refunds.list_refunds_by_invoice(invoice_id).await {
        Ok(refunds) => {
            let refunds: Vec<_> = refunds
                .into_iter()
                .filter(|r| r.clinic_id == clinic_id)
                .collect();
            (StatusCode::OK, Json(json!({ "refunds": refunds }))).into_response()
        }
        Err(e) => billing_error_response(e),
    }
}

/// POST `/clinics/{clinic_id}/invoices/{invoice_id}/refunds` - Issue a refund.
async fn create_refund(
    State(state): State<AppState>,
    Path((clinic_id, invoice_id)): Path<(ClinicId, InvoiceId)>,
    Json(payload): Json<CreateRefundRequest>,
) -> impl IntoResponse {
    let input = CreateRefundInput {
        clinic_id,
        invoice_id,
        amount: payload.amount,
        method: payload.method,
        reason: payload.reason,
        proof: payload.proof,
        created_by: payload.created_by,
    };

    match state.engine.refunds.create_refund(input).await {
        Ok(refund) => (StatusCode::CREATED, Json(refund)).into_response(),
        Err(e) => billing_error_response(e),
    }
}

/// GET `/clinics/{clinic_id}/refunds` - Refunds of a clinic within day bounds.
async fn list_refunds(
    State(state): State<AppState>,
    Path(clinic_id): Path<ClinicId>,
    Query(query): Query<ListRefundsQuery>,
) -> impl IntoResponse {
    let filter = RefundFilter {
        days: day_range(query.date_from, query.date_to),
    };

    match state
        .engine
        .refunds
        .list_refunds(clinic_id, filter, page_request(query.page, query.page_size))
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => billing_error_response(e),
    }
}
