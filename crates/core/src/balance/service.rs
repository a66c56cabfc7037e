//! Balance and history queries over the external ledgers.

use std::sync::Arc;

use clinic_shared::types::{ClinicId, PageRequest, PageResponse, PatientId, paginate};
use rust_decimal::Decimal;
use tracing::debug;

use super::aggregator::BalanceAggregator;
use super::types::{BalanceQuery, PatientBalance, PatientPaymentHistory};
use crate::error::BillingResult;
use crate::ledger::{InvoiceQuery, Ledgers, PaymentQuery};
use crate::sync::WriteFence;

/// Computes patient balances and payment histories.
#[derive(Clone)]
pub struct BalanceService {
    ledgers: Ledgers,
    fence: Arc<WriteFence>,
    unknown_patient_name: String,
    placeholder_phone: String,
}

impl BalanceService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        ledgers: Ledgers,
        fence: Arc<WriteFence>,
        unknown_patient_name: String,
        placeholder_phone: String,
    ) -> Self {
        Self {
            ledgers,
            fence,
            unknown_patient_name,
            placeholder_phone,
        }
    }

    /// Balances of every patient with payments or unpaid invoices in the clinic.
    ///
    /// Reads the full payment and unpaid-invoice sets, then filters, sorts and
    /// paginates in memory.
    pub async fn patient_balances(
        &self,
        clinic_id: ClinicId,
        query: &BalanceQuery,
        page: PageRequest,
    ) -> BillingResult<PageResponse<PatientBalance>> {
        let _snapshot = self.fence.snapshot().await;

        let payment_query = PaymentQuery::for_clinic(clinic_id);
        let invoice_query = InvoiceQuery::unpaid(clinic_id);
        let (payments, invoices) = futures::try_join!(
            self.ledgers.payments.list(&payment_query),
            self.ledgers.invoices.list(&invoice_query),
        )?;

        let tallies = BalanceAggregator::fold(&payments, &invoices);
        let patients = self
            .ledgers
            .resolve_patients(tallies.keys().copied())
            .await?;

        let balances = BalanceAggregator::resolve(
            tallies,
            &patients,
            &self.unknown_patient_name,
            &self.placeholder_phone,
        );
        let mut balances = BalanceAggregator::filter(balances, query);
        BalanceAggregator::sort_by_last_visit(&mut balances);

        debug!(
            clinic_id = %clinic_id,
            payments = payments.len(),
            unpaid_invoices = invoices.len(),
            patients = balances.len(),
            "Patient balances computed"
        );

        Ok(paginate(balances, page))
    }

    /// Payments and unpaid charges of one patient, both newest first.
    pub async fn patient_payment_history(
        &self,
        clinic_id: ClinicId,
        patient_id: PatientId,
    ) -> BillingResult<PatientPaymentHistory> {
        let _snapshot = self.fence.snapshot().await;

        let payment_query = PaymentQuery::for_clinic(clinic_id).patient(patient_id);
        let invoice_query = InvoiceQuery::unpaid(clinic_id).patient(patient_id);
        let (mut payments, mut unpaid_charges) = futures::try_join!(
            self.ledgers.payments.list(&payment_query),
            self.ledgers.invoices.list(&invoice_query),
        )?;

        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        unpaid_charges.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total_paid: Decimal = payments.iter().map(|p| p.amount).sum();
        let total_due: Decimal = unpaid_charges.iter().map(|i| i.amount).sum();

        Ok(PatientPaymentHistory {
            patient_id,
            payments,
            unpaid_charges,
            total_paid,
            total_due,
        })
    }
}
