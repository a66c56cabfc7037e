//! In-memory Payment Ledger: at most one payment per invoice.

use async_trait::async_trait;
use chrono::Utc;
use clinic_core::ledger::{
    NewPayment, Payment, PaymentLedger, PaymentQuery, PaymentStatus, StoreError,
};
use clinic_shared::types::{InvoiceId, PaymentId};
use tokio::sync::RwLock;

/// Payments kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryPaymentLedger {
    payments: RwLock<Vec<Payment>>,
}

impl InMemoryPaymentLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a fully formed payment, replacing any payment of the same invoice.
    pub async fn insert(&self, payment: Payment) {
        let mut payments = self.payments.write().await;
        payments.retain(|p| p.invoice_id != payment.invoice_id);
        payments.push(payment);
    }

    /// Removes every payment.
    pub async fn reset(&self) {
        self.payments.write().await.clear();
    }
}

#[async_trait]
impl PaymentLedger for InMemoryPaymentLedger {
    async fn get_by_id(&self, id: PaymentId) -> Result<Option<Payment>, StoreError> {
        Ok(self.payments.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn get_by_invoice_id(&self, invoice_id: InvoiceId) -> Result<Option<Payment>, StoreError> {
        Ok(self
            .payments
            .read()
            .await
            .iter()
            .find(|p| p.invoice_id == invoice_id)
            .cloned())
    }

    async fn create(&self, input: NewPayment) -> Result<Payment, StoreError> {
        let mut payments = self.payments.write().await;
        if payments.iter().any(|p| p.invoice_id == input.invoice_id) {
            return Err(StoreError::Conflict(format!(
                "invoice {} already has a payment",
                input.invoice_id
            )));
        }

        let payment = Payment {
            id: PaymentId::new(),
            clinic_id: input.clinic_id,
            invoice_id: input.invoice_id,
            patient_id: input.patient_id,
            appointment_id: input.appointment_id,
            amount: input.amount,
            method: input.method,
            status: PaymentStatus::Paid,
            created_by: input.created_by,
            created_at: Utc::now(),
        };
        payments.push(payment.clone());
        Ok(payment)
    }

    async fn update(&self, payment: Payment) -> Result<Payment, StoreError> {
        let mut payments = self.payments.write().await;
        let stored = payments
            .iter_mut()
            .find(|p| p.id == payment.id)
            .ok_or_else(|| StoreError::NotFound(format!("payment {}", payment.id)))?;

        stored.amount = payment.amount;
        stored.method = payment.method;
        Ok(stored.clone())
    }

    async fn delete_by_invoice_id(&self, invoice_id: InvoiceId) -> Result<bool, StoreError> {
        let mut payments = self.payments.write().await;
        let before = payments.len();
        payments.retain(|p| p.invoice_id != invoice_id);
        Ok(payments.len() != before)
    }

    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, StoreError> {
        let mut found: Vec<Payment> = self
            .payments
            .read()
            .await
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();

        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = query.limit {
            found.truncate(limit);
        }
        Ok(found)
    }
}
