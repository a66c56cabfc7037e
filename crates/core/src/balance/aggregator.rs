//! Folding payments and unpaid invoices into per-patient balances.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use clinic_shared::types::PatientId;
use rust_decimal::Decimal;

use super::types::{BalanceQuery, PatientBalance};
use crate::ledger::{Invoice, Patient, Payment};

/// Running totals for one patient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceTally {
    /// Sum of unpaid invoice amounts.
    pub total_due: Decimal,
    /// Latest activity of any kind.
    pub last_visit: Option<DateTime<Utc>>,
    /// Latest payment.
    pub last_payment: Option<DateTime<Utc>>,
}

impl BalanceTally {
    fn saw_payment(&mut self, payment: &Payment) {
        self.last_payment = latest(self.last_payment, payment.created_at);
        self.last_visit = latest(self.last_visit, payment.created_at);
    }

    fn saw_unpaid_invoice(&mut self, invoice: &Invoice) {
        self.total_due += invoice.amount;
        self.last_visit = latest(self.last_visit, invoice.created_at);
    }
}

fn latest(current: Option<DateTime<Utc>>, seen: DateTime<Utc>) -> Option<DateTime<Utc>> {
    Some(current.map_or(seen, |c| c.max(seen)))
}

/// Pure balance computations.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Builds one tally per patient seen in either source.
    ///
    /// Payments only move the dates. Unpaid invoices add their flat amount to
    /// `total_due`; settled invoices are ignored.
    #[must_use]
    pub fn fold(payments: &[Payment], invoices: &[Invoice]) -> BTreeMap<PatientId, BalanceTally> {
        let mut tallies: BTreeMap<PatientId, BalanceTally> = BTreeMap::new();

        for payment in payments {
            tallies
                .entry(payment.patient_id)
                .or_default()
                .saw_payment(payment);
        }

        for invoice in invoices.iter().filter(|i| i.is_unpaid()) {
            tallies
                .entry(invoice.patient_id)
                .or_default()
                .saw_unpaid_invoice(invoice);
        }

        tallies
    }

    /// Attaches directory details, substituting placeholders for unknown patients.
    #[must_use]
    pub fn resolve(
        tallies: BTreeMap<PatientId, BalanceTally>,
        patients: &HashMap<PatientId, Patient>,
        unknown_name: &str,
        placeholder_phone: &str,
    ) -> Vec<PatientBalance> {
        tallies
            .into_iter()
            .map(|(patient_id, tally)| {
                let (patient_name, phone) = patients.get(&patient_id).map_or_else(
                    || (unknown_name.to_string(), placeholder_phone.to_string()),
                    |p| (p.name.clone(), p.phone.clone()),
                );
                PatientBalance {
                    patient_id,
                    patient_name,
                    phone,
                    total_due: tally.total_due,
                    last_visit: tally.last_visit,
                    last_payment: tally.last_payment,
                }
            })
            .collect()
    }

    /// Applies the name/phone search and the outstanding-only filter.
    #[must_use]
    pub fn filter(balances: Vec<PatientBalance>, query: &BalanceQuery) -> Vec<PatientBalance> {
        let needle = query
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        balances
            .into_iter()
            .filter(|b| !query.only_with_balance || b.total_due > Decimal::ZERO)
            .filter(|b| {
                needle.as_deref().is_none_or(|n| {
                    b.patient_name.to_lowercase().contains(n) || b.phone.to_lowercase().contains(n)
                })
            })
            .collect()
    }

    /// Orders by last visit, most recent first; patients without one go last.
    pub fn sort_by_last_visit(balances: &mut [PatientBalance]) {
        balances.sort_by(|a, b| {
            b.last_visit
                .cmp(&a.last_visit)
                .then_with(|| a.patient_id.cmp(&b.patient_id))
        });
    }
}
