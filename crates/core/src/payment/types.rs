//! Payment operation inputs and filters.

use clinic_shared::types::{AppointmentId, ClinicId, DayRange, PatientId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{Payment, PaymentMethod, PaymentStatus};

/// Input for recording the payment of an appointment's invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentInput {
    /// Clinic collecting the money.
    pub clinic_id: ClinicId,
    /// Appointment whose invoice is being settled.
    pub appointment_id: AppointmentId,
    /// Amount collected.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
    /// Staff user recording the payment.
    pub created_by: UserId,
}

/// Partial edit of an existing payment. `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePaymentInput {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New method.
    pub method: Option<PaymentMethod>,
}

/// Filters for listing payments of a clinic.
///
/// `patient_id` and `days` are pushed down to the Payment Ledger;
/// `appointment_id` and `status` narrow the result locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    /// Restrict to one patient.
    pub patient_id: Option<PatientId>,
    /// Restrict to one appointment.
    pub appointment_id: Option<AppointmentId>,
    /// Restrict to one status.
    pub status: Option<PaymentStatus>,
    /// Creation day bounds, inclusive.
    pub days: DayRange,
}

impl PaymentFilter {
    /// Whether a payment passes the locally applied filters.
    #[must_use]
    pub fn matches_local(&self, payment: &Payment) -> bool {
        self.appointment_id
            .is_none_or(|a| payment.appointment_id == Some(a))
            && self.status.is_none_or(|s| payment.status == s)
    }
}
