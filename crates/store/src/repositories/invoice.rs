//! In-memory Invoice Ledger.

use async_trait::async_trait;
use chrono::Utc;
use clinic_core::ledger::{
    Invoice, InvoiceLedger, InvoiceQuery, InvoiceStatus, NewInvoice, StoreError,
};
use clinic_shared::types::{AppointmentId, InvoiceId};
use tokio::sync::RwLock;
use tracing::debug;

/// Invoices kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceLedger {
    invoices: RwLock<Vec<Invoice>>,
}

impl InMemoryInvoiceLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a fully formed invoice, replacing one with the same id.
    pub async fn insert(&self, invoice: Invoice) {
        let mut invoices = self.invoices.write().await;
        invoices.retain(|i| i.id != invoice.id);
        invoices.push(invoice);
    }

    /// Number of stored invoices.
    pub async fn len(&self) -> usize {
        self.invoices.read().await.len()
    }

    /// Returns true if no invoice is stored.
    pub async fn is_empty(&self) -> bool {
        self.invoices.read().await.is_empty()
    }

    /// Removes every invoice.
    pub async fn reset(&self) {
        self.invoices.write().await.clear();
    }

    async fn set_status(&self, id: InvoiceId, status: InvoiceStatus) -> Result<(), StoreError> {
        let mut invoices = self.invoices.write().await;
        let invoice = invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("invoice {id}")))?;
        invoice.status = status;
        Ok(())
    }
}

#[async_trait]
impl InvoiceLedger for InMemoryInvoiceLedger {
    async fn get_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        Ok(self.invoices.read().await.iter().find(|i| i.id == id).cloned())
    }

    async fn get_by_appointment_id(
        &self,
        appointment_id: AppointmentId,
    ) -> Result<Option<Invoice>, StoreError> {
        // Follow-up invoices share the appointment; the original is the first one.
        Ok(self
            .invoices
            .read()
            .await
            .iter()
            .find(|i| i.appointment_id == Some(appointment_id))
            .cloned())
    }

    async fn create_with_amount(&self, input: NewInvoice) -> Result<Invoice, StoreError> {
        let invoice = Invoice {
            id: InvoiceId::new(),
            clinic_id: input.clinic_id,
            patient_id: input.patient_id,
            doctor_id: input.doctor_id,
            appointment_id: input.appointment_id,
            appointment_type: input.appointment_type,
            amount: input.amount,
            line_items: Vec::new(),
            status: InvoiceStatus::Unpaid,
            created_at: Utc::now(),
        };

        self.invoices.write().await.push(invoice.clone());
        debug!(invoice_id = %invoice.id, amount = %invoice.amount, "Invoice created");
        Ok(invoice)
    }

    async fn mark_paid(&self, id: InvoiceId) -> Result<(), StoreError> {
        self.set_status(id, InvoiceStatus::Paid).await
    }

    async fn mark_unpaid(&self, id: InvoiceId) -> Result<(), StoreError> {
        self.set_status(id, InvoiceStatus::Unpaid).await
    }

    async fn list(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, StoreError> {
        let mut found: Vec<Invoice> = self
            .invoices
            .read()
            .await
            .iter()
            .filter(|i| query.matches(i))
            .cloned()
            .collect();

        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = query.limit {
            found.truncate(limit);
        }
        Ok(found)
    }
}
