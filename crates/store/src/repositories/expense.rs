//! In-memory Expense Store.

use async_trait::async_trait;
use clinic_core::expense::{Expense, ExpenseStore};
use clinic_core::ledger::StoreError;
use clinic_shared::types::ClinicId;
use tokio::sync::RwLock;

/// Append-only expenses.
#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    expenses: RwLock<Vec<Expense>>,
}

impl InMemoryExpenseStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every expense.
    pub async fn reset(&self) {
        self.expenses.write().await.clear();
    }
}

#[async_trait]
impl ExpenseStore for InMemoryExpenseStore {
    async fn append(&self, expense: Expense) -> Result<Expense, StoreError> {
        self.expenses.write().await.push(expense.clone());
        Ok(expense)
    }

    async fn list_by_clinic(&self, clinic_id: ClinicId) -> Result<Vec<Expense>, StoreError> {
        Ok(self
            .expenses
            .read()
            .await
            .iter()
            .filter(|e| e.clinic_id == clinic_id)
            .cloned()
            .collect())
    }
}
