//! Pure construction of cashier rows.

use std::collections::{HashMap, HashSet};

use clinic_shared::types::PatientId;

use super::types::{CashierRow, CashierRowKind};
use crate::ledger::{Invoice, Patient, Payment, PaymentStatus};

/// Merges payments and unpaid invoices into display rows.
pub struct CashierViewBuilder;

impl CashierViewBuilder {
    /// Builds one row per payment and per unpaid invoice, newest first.
    ///
    /// Row keys are unique within the result. The earliest payment of an
    /// appointment is keyed by the appointment id; later payments of the same
    /// appointment and payments without one get `payment-{id}`. Invoice rows
    /// are always `invoice-{id}`.
    #[must_use]
    pub fn build(
        payments: &[Payment],
        unpaid: &[Invoice],
        patients: &HashMap<PatientId, Patient>,
        unknown_name: &str,
    ) -> Vec<CashierRow> {
        let name_of = |patient_id: PatientId| {
            patients
                .get(&patient_id)
                .map_or_else(|| unknown_name.to_string(), |p| p.name.clone())
        };

        let mut oldest_first: Vec<&Payment> = payments.iter().collect();
        oldest_first.sort_by_key(|payment| payment.created_at);

        let mut keyed_appointments = HashSet::new();
        let payment_rows = oldest_first.into_iter().map(|payment| CashierRow {
            key: match payment.appointment_id {
                Some(appointment_id) if keyed_appointments.insert(appointment_id) => {
                    appointment_id.to_string()
                }
                _ => format!("payment-{}", payment.id),
            },
            kind: CashierRowKind::Payment,
            payment_status: PaymentStatus::Paid,
            invoice_id: payment.invoice_id,
            payment_id: Some(payment.id),
            appointment_id: payment.appointment_id,
            patient_id: payment.patient_id,
            patient_name: name_of(payment.patient_id),
            fee: Some(payment.amount),
            amount_due: None,
            method: Some(payment.method),
            time: payment.created_at,
        });

        let invoice_rows = unpaid
            .iter()
            .filter(|invoice| invoice.is_unpaid())
            .map(|invoice| CashierRow {
                key: format!("invoice-{}", invoice.id),
                kind: CashierRowKind::Invoice,
                payment_status: PaymentStatus::Unpaid,
                invoice_id: invoice.id,
                payment_id: None,
                appointment_id: invoice.appointment_id,
                patient_id: invoice.patient_id,
                patient_name: name_of(invoice.patient_id),
                fee: None,
                amount_due: Some(invoice.total()),
                method: None,
                time: invoice.created_at,
            });

        let mut rows: Vec<CashierRow> = payment_rows.chain(invoice_rows).collect();
        rows.sort_by(|a, b| b.time.cmp(&a.time));
        rows
    }
}
