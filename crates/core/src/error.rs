//! Billing error taxonomy.
//!
//! Mutating operations validate everything before their first write, so a
//! returned error means nothing was written. Reads never fail on missing
//! data; they return `None` or empty collections.

use clinic_shared::AppError;
use clinic_shared::types::{AppointmentId, InvoiceId, PaymentId, YearMonthParseError};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::StoreError;

/// Result type alias using `BillingError`.
pub type BillingResult<T> = Result<T, BillingError>;

/// Errors that can occur in billing operations.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Invoice does not exist (or belongs to another clinic).
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// No invoice has been raised for the appointment.
    #[error("No invoice found for appointment {0}")]
    InvoiceForAppointmentNotFound(AppointmentId),

    /// Payment does not exist.
    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    /// Amount must be strictly positive.
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),

    /// Refund would exceed what is left to refund on the invoice.
    #[error("Refund amount {requested} exceeds the refundable amount of {refundable}")]
    RefundExceedsRefundable {
        /// Amount requested.
        requested: Decimal,
        /// Current refundable ceiling.
        refundable: Decimal,
    },

    /// The invoice has already been settled.
    #[error("Invoice {0} is already paid")]
    AlreadyPaid(InvoiceId),

    /// Month parameter could not be parsed.
    #[error("Invalid month: {0}")]
    InvalidMonth(#[from] YearMonthParseError),

    /// A store or ledger call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BillingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvoiceNotFound(_) => "INVOICE_NOT_FOUND",
            Self::InvoiceForAppointmentNotFound(_) => "APPOINTMENT_INVOICE_NOT_FOUND",
            Self::PaymentNotFound(_) => "PAYMENT_NOT_FOUND",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::RefundExceedsRefundable { .. } => "REFUND_EXCEEDS_REFUNDABLE",
            Self::AlreadyPaid(_) => "ALREADY_PAID",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        let message = err.to_string();
        match err {
            BillingError::InvoiceNotFound(_)
            | BillingError::InvoiceForAppointmentNotFound(_)
            | BillingError::PaymentNotFound(_) => Self::NotFound(message),
            BillingError::InvalidAmount(_) | BillingError::InvalidMonth(_) => {
                Self::Validation(message)
            }
            BillingError::RefundExceedsRefundable { .. } => Self::BusinessRule(message),
            BillingError::AlreadyPaid(_) => Self::Conflict(message),
            BillingError::Store(StoreError::Conflict(_)) => Self::Conflict(message),
            BillingError::Store(_) => Self::Store(message),
        }
    }
}
