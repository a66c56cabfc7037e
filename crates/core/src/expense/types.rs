//! Expense data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use clinic_shared::types::{ClinicId, DayRange, ExpenseId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::PaymentMethod;

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Premises rent.
    Rent,
    /// Staff salaries.
    Salaries,
    /// Medical and office supplies.
    Supplies,
    /// Electricity, water, internet.
    Utilities,
    /// Equipment purchases.
    Equipment,
    /// Repairs and servicing.
    Maintenance,
    /// Advertising.
    Marketing,
    /// Anything else.
    Other,
}

impl ExpenseCategory {
    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Salaries => "salaries",
            Self::Supplies => "supplies",
            Self::Utilities => "utilities",
            Self::Equipment => "equipment",
            Self::Maintenance => "maintenance",
            Self::Marketing => "marketing",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rent" => Ok(Self::Rent),
            "salaries" => Ok(Self::Salaries),
            "supplies" => Ok(Self::Supplies),
            "utilities" => Ok(Self::Utilities),
            "equipment" => Ok(Self::Equipment),
            "maintenance" => Ok(Self::Maintenance),
            "marketing" => Ok(Self::Marketing),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown expense category: {other}")),
        }
    }
}

/// A clinic expense. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning clinic.
    pub clinic_id: ClinicId,
    /// Category.
    pub category: ExpenseCategory,
    /// Amount spent (sign is not checked).
    pub amount: Decimal,
    /// Who was paid.
    pub vendor: String,
    /// Free-text description.
    pub description: String,
    /// How it was paid.
    pub payment_method: PaymentMethod,
    /// Optional link to the receipt.
    pub receipt_url: Option<String>,
    /// Day the expense was incurred.
    pub date: NaiveDate,
    /// Staff user who recorded it.
    pub created_by: UserId,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for recording an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseInput {
    /// Owning clinic.
    pub clinic_id: ClinicId,
    /// Category.
    pub category: ExpenseCategory,
    /// Amount spent.
    pub amount: Decimal,
    /// Who was paid.
    pub vendor: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// How it was paid.
    pub payment_method: PaymentMethod,
    /// Optional link to the receipt.
    pub receipt_url: Option<String>,
    /// Day the expense was incurred.
    pub date: NaiveDate,
    /// Staff user recording it.
    pub created_by: UserId,
}

/// Filters for listing expenses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Restrict to one category.
    pub category: Option<ExpenseCategory>,
    /// Expense day bounds, inclusive.
    pub days: DayRange,
}

impl ExpenseFilter {
    /// Whether an expense satisfies the filter.
    #[must_use]
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.is_none_or(|c| expense.category == c) && self.days.contains(expense.date)
    }
}
