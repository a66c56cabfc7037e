//! In-memory implementations of every `clinic-core` port.
//!
//! Suitable for a single process and for tests. Each store keeps its records
//! behind a `tokio::sync::RwLock` and exposes `reset()` for test isolation.

pub mod repositories;

use std::sync::Arc;

use clinic_core::Stores;
use clinic_core::ledger::Ledgers;

pub use repositories::{
    InMemoryExpenseStore, InMemoryInvoiceLedger, InMemoryPatientDirectory, InMemoryPaymentLedger,
    InMemoryRefundStore, InMemorySettingsStore,
};

/// One instance of every in-memory store, shared by `Arc`.
#[derive(Clone, Default)]
pub struct InMemoryStores {
    /// Invoice Ledger.
    pub invoices: Arc<InMemoryInvoiceLedger>,
    /// Payment Ledger.
    pub payments: Arc<InMemoryPaymentLedger>,
    /// Patient Directory.
    pub patients: Arc<InMemoryPatientDirectory>,
    /// Refund Ledger.
    pub refunds: Arc<InMemoryRefundStore>,
    /// Expense Store.
    pub expenses: Arc<InMemoryExpenseStore>,
    /// Settings Store.
    pub settings: Arc<InMemorySettingsStore>,
}

impl InMemoryStores {
    /// Creates empty stores.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stores as the trait objects the engine consumes.
    #[must_use]
    pub fn stores(&self) -> Stores {
        Stores {
            ledgers: Ledgers {
                invoices: self.invoices.clone(),
                payments: self.payments.clone(),
                patients: self.patients.clone(),
            },
            refunds: self.refunds.clone(),
            expenses: self.expenses.clone(),
            settings: self.settings.clone(),
        }
    }

    /// Empties every store.
    pub async fn reset(&self) {
        tokio::join!(
            self.invoices.reset(),
            self.payments.reset(),
            self.patients.reset(),
            self.refunds.reset(),
            self.expenses.reset(),
            self.settings.reset(),
        );
    }
}
