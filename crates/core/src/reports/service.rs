//! Monthly report queries.

use std::sync::Arc;

use clinic_shared::types::{ClinicId, DayRange, YearMonth};
use tracing::debug;

use super::calculator::MonthlySummaryCalculator;
use super::types::MonthlySummary;
use crate::error::BillingResult;
use crate::expense::{Expense, ExpenseStore};
use crate::ledger::{InvoiceQuery, Ledgers, PaymentQuery};
use crate::sync::WriteFence;

/// Produces monthly financial summaries.
#[derive(Clone)]
pub struct ReportService {
    ledgers: Ledgers,
    expenses: Arc<dyn ExpenseStore>,
    fence: Arc<WriteFence>,
}

impl ReportService {
    /// Creates the service.
    #[must_use]
    pub fn new(ledgers: Ledgers, expenses: Arc<dyn ExpenseStore>, fence: Arc<WriteFence>) -> Self {
        Self {
            ledgers,
            expenses,
            fence,
        }
    }

    /// Summary of one clinic-month.
    ///
    /// The month spans days 1 through 31 whatever its real length.
    pub async fn monthly_summary(
        &self,
        clinic_id: ClinicId,
        month: YearMonth,
    ) -> BillingResult<MonthlySummary> {
        let _snapshot = self.fence.snapshot().await;
        let days = DayRange::month(month);

        let payment_query = PaymentQuery::for_clinic(clinic_id).days(days);
        let invoice_query = InvoiceQuery::unpaid(clinic_id).days(days);
        let (payments, invoices, expenses) = futures::try_join!(
            self.ledgers.payments.list(&payment_query),
            self.ledgers.invoices.list(&invoice_query),
            self.expenses.list_by_clinic(clinic_id),
        )?;

        let expenses: Vec<Expense> = expenses
            .into_iter()
            .filter(|e| days.contains(e.date))
            .collect();

        let summary = MonthlySummaryCalculator::summarize(month, &payments, &expenses, &invoices);

        debug!(
            clinic_id = %clinic_id,
            month = %month,
            revenue = %summary.total_revenue,
            expenses = %summary.total_expenses,
            "Monthly summary computed"
        );

        Ok(summary)
    }
}
