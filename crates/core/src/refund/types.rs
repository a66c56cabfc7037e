//! Refund data types.

use chrono::{DateTime, Utc};
use clinic_shared::types::{ClinicId, DayRange, InvoiceId, PatientId, RefundId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::PaymentMethod;

/// A return of money already collected on an invoice. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    /// Refund ID.
    pub id: RefundId,
    /// Owning clinic.
    pub clinic_id: ClinicId,
    /// Refunded invoice.
    pub invoice_id: InvoiceId,
    /// Patient receiving the money.
    pub patient_id: PatientId,
    /// Patient name as it was when the refund was issued.
    pub patient_name: String,
    /// Refunded amount (always > 0).
    pub amount: Decimal,
    /// How the money was returned.
    pub method: PaymentMethod,
    /// Optional reason.
    pub reason: Option<String>,
    /// Optional reference to proof (receipt number, attachment key).
    pub proof: Option<String>,
    /// Staff user who issued the refund.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for issuing a refund.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRefundInput {
    /// Clinic issuing the refund.
    pub clinic_id: ClinicId,
    /// Invoice being refunded.
    pub invoice_id: InvoiceId,
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

/// Refund position of one invoice, recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRefundSummary {
    /// Invoice ID.
    pub invoice_id: InvoiceId,
    /// Invoice total (line items, else flat amount).
    pub invoice_total: Decimal,
    /// Amount of the invoice's payment, or zero.
    pub invoice_paid: Decimal,
    /// Sum of refunds recorded against the invoice.
    pub invoice_refunded: Decimal,
    /// `max(0, invoice_paid - invoice_refunded)`.
    pub refundable: Decimal,
}

/// Filters for listing refunds of a clinic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefundFilter {
    /// Creation day bounds, inclusive.
    pub days: DayRange,
}
