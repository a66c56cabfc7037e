//! Expense recording and listing.

use std::sync::Arc;

use chrono::Utc;
use clinic_shared::types::{ClinicId, ExpenseId, PageRequest, PageResponse, paginate};
use tracing::info;

use super::store::ExpenseStore;
use super::types::{CreateExpenseInput, Expense, ExpenseFilter};
use crate::error::BillingResult;
use crate::sync::WriteFence;

/// Records and lists clinic expenses.
#[derive(Clone)]
pub struct ExpenseService {
    expenses: Arc<dyn ExpenseStore>,
    fence: Arc<WriteFence>,
}

impl ExpenseService {
    /// Creates the service over its store.
    #[must_use]
    pub fn new(expenses: Arc<dyn ExpenseStore>, fence: Arc<WriteFence>) -> Self {
        Self { expenses, fence }
    }

    /// Appends an expense with a fresh id and creation timestamp.
    ///
    /// The amount is stored as given.
    pub async fn create_expense(&self, input: CreateExpenseInput) -> BillingResult<Expense> {
        let _fence = self.fence.mutation().await;

        let expense = self
            .expenses
            .append(Expense {
                id: ExpenseId::new(),
                clinic_id: input.clinic_id,
                category: input.category,
                amount: input.amount,
                vendor: input.vendor,
                description: input.description,
                payment_method: input.payment_method,
                receipt_url: input.receipt_url,
                date: input.date,
                created_by: input.created_by,
                created_at: Utc::now(),
            })
            .await?;

        info!(
            clinic_id = %expense.clinic_id,
            expense_id = %expense.id,
            category = %expense.category,
            amount = %expense.amount,
            "Expense recorded"
        );

        Ok(expense)
    }

    /// Lists expenses of a clinic by expense date, newest first, paginated.
    pub async fn list_expenses(
        &self,
        clinic_id: ClinicId,
        filter: ExpenseFilter,
        page: PageRequest,
    ) -> BillingResult<PageResponse<Expense>> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .list_by_clinic(clinic_id)
            .await?
            .into_iter()
            .filter(|expense| filter.matches(expense))
            .collect();

        expenses.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        Ok(paginate(expenses, page))
    }
}
