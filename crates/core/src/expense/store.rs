//! Expense persistence port.

use async_trait::async_trait;
use clinic_shared::types::ClinicId;

use super::types::Expense;
use crate::ledger::StoreError;

/// Append-only expense storage.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Stores a new expense and returns it.
    async fn append(&self, expense: Expense) -> Result<Expense, StoreError>;

    /// All expenses of a clinic, in insertion order.
    async fn list_by_clinic(&self, clinic_id: ClinicId) -> Result<Vec<Expense>, StoreError>;
}
