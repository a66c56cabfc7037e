//! Cashier view for one clinic-day.

use std::sync::Arc;

use chrono::NaiveDate;
use clinic_shared::types::{ClinicId, DayRange};
use tracing::debug;

use super::builder::CashierViewBuilder;
use super::types::CashierRow;
use crate::error::BillingResult;
use crate::ledger::{InvoiceQuery, Ledgers, PaymentQuery};
use crate::sync::WriteFence;

/// Builds the daily cashier ledger.
#[derive(Clone)]
pub struct CashierService {
    ledgers: Ledgers,
    fence: Arc<WriteFence>,
    row_limit: usize,
    unknown_patient_name: String,
}

impl CashierService {
    /// Creates the service. `row_limit` caps each of the two ledger reads.
    #[must_use]
    pub fn new(
        ledgers: Ledgers,
        fence: Arc<WriteFence>,
        row_limit: usize,
        unknown_patient_name: String,
    ) -> Self {
        Self {
            ledgers,
            fence,
            row_limit,
            unknown_patient_name,
        }
    }

    /// Payments and unpaid invoices of one day, newest first. Not paginated.
    pub async fn cashier_rows(
        &self,
        clinic_id: ClinicId,
        date: NaiveDate,
    ) -> BillingResult<Vec<CashierRow>> {
        let _snapshot = self.fence.snapshot().await;
        let day = DayRange::single_day(date);

        let payment_query = PaymentQuery::for_clinic(clinic_id)
            .days(day)
            .limit(self.row_limit);
        let invoice_query = InvoiceQuery::unpaid(clinic_id)
            .days(day)
            .limit(self.row_limit);
        let (payments, invoices) = futures::try_join!(
            self.ledgers.payments.list(&payment_query),
            self.ledgers.invoices.list(&invoice_query),
        )?;

        let patients = self
            .ledgers
            .resolve_patients(
                payments
                    .iter()
                    .map(|p| p.patient_id)
                    .chain(invoices.iter().map(|i| i.patient_id)),
            )
            .await?;

        let rows = CashierViewBuilder::build(
            &payments,
            &invoices,
            &patients,
            &self.unknown_patient_name,
        );

        debug!(clinic_id = %clinic_id, date = %date, rows = rows.len(), "Cashier rows built");

        Ok(rows)
    }
}
