//! Persistence port for refunds.

use async_trait::async_trait;
use clinic_shared::types::{ClinicId, InvoiceId, RefundId};

use super::types::Refund;
use crate::ledger::StoreError;

/// Append-only refund storage.
///
/// `append` is the only regular write. `remove` exists solely to take back a
/// refund whose issuance failed after the append.
#[async_trait]
pub trait RefundStore: Send + Sync {
    /// Appends a refund record.
    async fn append(&self, refund: Refund) -> Result<Refund, StoreError>;

    /// Removes a refund appended by an issuance that then failed. Returns
    /// whether it existed.
    async fn remove(&self, id: RefundId) -> Result<bool, StoreError>;

    /// All refunds recorded against an invoice, in any order.
    async fn list_by_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<Refund>, StoreError>;

    /// All refunds of a clinic, in any order.
    async fn list_by_clinic(&self, clinic_id: ClinicId) -> Result<Vec<Refund>, StoreError>;
}
