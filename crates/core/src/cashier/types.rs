//! Cashier row schema.

use chrono::{DateTime, Utc};
use clinic_shared::types::{AppointmentId, InvoiceId, PatientId, PaymentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{PaymentMethod, PaymentStatus};

/// Where a cashier row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashierRowKind {
    /// A recorded payment.
    Payment,
    /// An invoice still awaiting payment.
    Invoice,
}

/// One line of the daily money ledger.
///
/// Payment rows carry `fee`, `method` and `payment_id`; invoice rows leave
/// them empty and carry the charge in `amount_due`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashierRow {
    /// Stable row key, unique within one day's rows. Payment rows use the
    /// appointment id where it is free, invoice rows `invoice-{id}`.
    pub key: String,
    /// Row origin.
    pub kind: CashierRowKind,
    /// Paid or unpaid.
    pub payment_status: PaymentStatus,
    /// Invoice the row belongs to.
    pub invoice_id: InvoiceId,
    /// Payment, for payment rows.
    pub payment_id: Option<PaymentId>,
    /// Appointment, when known.
    pub appointment_id: Option<AppointmentId>,
    /// Patient.
    pub patient_id: PatientId,
    /// Patient display name.
    pub patient_name: String,
    /// Amount collected, for payment rows.
    pub fee: Option<Decimal>,
    /// Amount still owed, for invoice rows.
    pub amount_due: Option<Decimal>,
    /// Payment method, for payment rows.
    pub method: Option<PaymentMethod>,
    /// Display time: payment or invoice creation time.
    pub time: DateTime<Utc>,
}
