//! Invoice, payment and patient records as read from the external ledgers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clinic_shared::types::{
    AppointmentId, ClinicId, DoctorId, InvoiceId, PatientId, PaymentId, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Not yet settled.
    Unpaid,
    /// Settled by exactly one payment.
    Paid,
}

/// One billable line on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// What was charged.
    pub description: String,
    /// Line amount.
    pub amount: Decimal,
}

/// A billable charge for a patient visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice ID.
    pub id: InvoiceId,
    /// Owning clinic.
    pub clinic_id: ClinicId,
    /// Billed patient.
    pub patient_id: PatientId,
    /// Treating doctor.
    pub doctor_id: DoctorId,
    /// Appointment the charge belongs to, if any.
    pub appointment_id: Option<AppointmentId>,
    /// Appointment type label (e.g. "consultation").
    pub appointment_type: Option<String>,
    /// Flat amount, used when there are no line items.
    pub amount: Decimal,
    /// Optional itemisation.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Settlement status.
    pub status: InvoiceStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Invoice total: the sum of line items when present, else the flat amount.
    #[must_use]
    pub fn total(&self) -> Decimal {
        if self.line_items.is_empty() {
            self.amount
        } else {
            self.line_items.iter().map(|item| item.amount).sum()
        }
    }

    /// Returns true if the invoice is still unpaid.
    #[must_use]
    pub fn is_unpaid(&self) -> bool {
        self.status == InvoiceStatus::Unpaid
    }
}

/// Input for `InvoiceLedger::create_with_amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    /// Owning clinic.
    pub clinic_id: ClinicId,
    /// Billed patient.
    pub patient_id: PatientId,
    /// Treating doctor.
    pub doctor_id: DoctorId,
    /// Appointment the charge belongs to.
    pub appointment_id: Option<AppointmentId>,
    /// Appointment type label.
    pub appointment_type: Option<String>,
    /// Flat amount.
    pub amount: Decimal,
}

/// How money changed hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the desk.
    Cash,
    /// Debit or credit card.
    Card,
    /// Bank transfer.
    BankTransfer,
    /// Mobile wallet.
    MobileWallet,
    /// Paid by an insurer.
    Insurance,
    /// Anything else.
    Other,
}

impl PaymentMethod {
    /// Stable lowercase name, matching the serde representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::BankTransfer => "bank_transfer",
            Self::MobileWallet => "mobile_wallet",
            Self::Insurance => "insurance",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "bank_transfer" => Ok(Self::BankTransfer),
            "mobile_wallet" => Ok(Self::MobileWallet),
            "insurance" => Ok(Self::Insurance),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown payment method: {s}")),
        }
    }
}

/// Whether a money event has been settled.
///
/// The Payment Ledger only records completed payments, so stored payments are
/// always `Paid`; `Unpaid` tags charges that have no payment yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Money collected.
    Paid,
    /// Charge outstanding.
    Unpaid,
}

/// The single settlement record against an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment ID.
    pub id: PaymentId,
    /// Owning clinic.
    pub clinic_id: ClinicId,
    /// Settled invoice (at most one payment per invoice).
    pub invoice_id: InvoiceId,
    /// Paying patient.
    pub patient_id: PatientId,
    /// Appointment the payment belongs to, if any.
    pub appointment_id: Option<AppointmentId>,
    /// Amount collected.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
    /// Settlement status.
    pub status: PaymentStatus,
    /// Staff user who recorded the payment.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for `PaymentLedger::create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    /// Owning clinic.
    pub clinic_id: ClinicId,
    /// Settled invoice.
    pub invoice_id: InvoiceId,
    /// Paying patient.
    pub patient_id: PatientId,
    /// Appointment the payment belongs to.
    pub appointment_id: Option<AppointmentId>,
    /// Amount collected.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
    /// Staff user recording the payment.
    pub created_by: UserId,
}

/// A patient as resolved from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Patient ID.
    pub id: PatientId,
    /// Display name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
}
