//! Report types.

use std::collections::BTreeMap;

use clinic_shared::types::YearMonth;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::PaymentMethod;

/// Revenue, expenses and outstanding charges of one clinic-month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Reported month.
    pub month: YearMonth,
    /// Sum of payments.
    pub total_revenue: Decimal,
    /// Sum of expenses.
    pub total_expenses: Decimal,
    /// `total_revenue - total_expenses`.
    pub net_profit: Decimal,
    /// Sum of unpaid invoice amounts.
    pub total_outstanding: Decimal,
    /// Revenue per payment method; values sum to `total_revenue`.
    pub payment_method_breakdown: BTreeMap<PaymentMethod, Decimal>,
}
