//! Pure monthly summary computation.

use std::collections::BTreeMap;

use clinic_shared::types::YearMonth;
use rust_decimal::Decimal;

use super::types::MonthlySummary;
use crate::expense::Expense;
use crate::ledger::{Invoice, Payment, PaymentMethod};

/// Folds a month's payments, expenses and unpaid invoices into a summary.
pub struct MonthlySummaryCalculator;

impl MonthlySummaryCalculator {
    /// Computes the summary. Inputs are expected to be already restricted to
    /// the month; paid invoices in `invoices` are ignored.
    #[must_use]
    pub fn summarize(
        month: YearMonth,
        payments: &[Payment],
        expenses: &[Expense],
        invoices: &[Invoice],
    ) -> MonthlySummary {
        let payment_method_breakdown = Self::breakdown(payments);
        let total_revenue: Decimal = payments.iter().map(|p| p.amount).sum();
        let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();
        let total_outstanding: Decimal = invoices
            .iter()
            .filter(|i| i.is_unpaid())
            .map(|i| i.amount)
            .sum();

        MonthlySummary {
            month,
            total_revenue,
            total_expenses,
            net_profit: total_revenue - total_expenses,
            total_outstanding,
            payment_method_breakdown,
        }
    }

    /// Sums payment amounts per method.
    #[must_use]
    pub fn breakdown(payments: &[Payment]) -> BTreeMap<PaymentMethod, Decimal> {
        payments.iter().fold(BTreeMap::new(), |mut acc, p| {
            *acc.entry(p.method).or_insert(Decimal::ZERO) += p.amount;
            acc
        })
    }
}
