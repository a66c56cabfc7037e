//! In-memory Refund Ledger.

use async_trait::async_trait;
use clinic_core::ledger::StoreError;
use clinic_core::refund::{Refund, RefundStore};
use clinic_shared::types::{ClinicId, InvoiceId, RefundId};
use tokio::sync::RwLock;

/// Append-only refunds.
#[derive(Debug, Default)]
pub struct InMemoryRefundStore {
    refunds: RwLock<Vec<Refund>>,
}

impl InMemoryRefundStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored refunds.
    pub async fn len(&self) -> usize {
        self.refunds.read().await.len()
    }

    /// Returns true if no refund is stored.
    pub async fn is_empty(&self) -> bool {
        self.refunds.read().await.is_empty()
    }

    /// Removes every refund.
    pub async fn reset(&self) {
        self.refunds.write().await.clear();
    }
}

#[async_trait]
impl RefundStore for InMemoryRefundStore {
    async fn append(&self, refund: Refund) -> Result<Refund, StoreError> {
        self.refunds.write().await.push(refund.clone());
        Ok(refund)
    }

    async fn remove(&self, id: RefundId) -> Result<bool, StoreError> {
        let mut refunds = self.refunds.write().await;
        let before = refunds.len();
        refunds.retain(|r| r.id != id);
        Ok(refunds.len() != before)
    }

    async fn list_by_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<Refund>, StoreError> {
        Ok(self
            .refunds
            .read()
            .await
            .iter()
            .filter(|r| r.invoice_id == invoice_id)
            .cloned()
            .collect())
    }

    async fn list_by_clinic(&self, clinic_id: ClinicId) -> Result<Vec<Refund>, StoreError> {
        Ok(self
            .refunds
            .read()
            .await
            .iter()
            .filter(|r| r.clinic_id == clinic_id)
            .cloned()
            .collect())
    }
}
