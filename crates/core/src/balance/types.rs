//! Balance read models.

use chrono::{DateTime, Utc};
use clinic_shared::types::PatientId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{Invoice, Payment};

/// What one patient owes the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientBalance {
    /// Patient ID.
    pub patient_id: PatientId,
    /// Display name, or the configured placeholder.
    pub patient_name: String,
    /// Contact phone, or the configured placeholder.
    pub phone: String,
    /// Sum of unpaid invoice amounts.
    pub total_due: Decimal,
    /// Latest payment or unpaid invoice timestamp.
    pub last_visit: Option<DateTime<Utc>>,
    /// Latest payment timestamp.
    pub last_payment: Option<DateTime<Utc>>,
}

/// Post-filters for the balance list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceQuery {
    /// Case-insensitive substring of the patient name or phone.
    pub query: Option<String>,
    /// Keep only patients with `total_due > 0`.
    #[serde(default)]
    pub only_with_balance: bool,
}

/// One patient's payments and open charges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientPaymentHistory {
    /// Patient ID.
    pub patient_id: PatientId,
    /// Payments, newest first.
    pub payments: Vec<Payment>,
    /// Unpaid invoices, newest first.
    pub unpaid_charges: Vec<Invoice>,
    /// Sum of payment amounts.
    pub total_paid: Decimal,
    /// Sum of unpaid invoice amounts.
    pub total_due: Decimal,
}
