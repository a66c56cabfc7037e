//! Concurrency guards for check-then-write operations and consistent reads.
//!
//! Lock order is always fence first, then the invoice guard. Taking them in
//! the other order can deadlock against a pending snapshot.

use std::sync::Arc;

use clinic_shared::types::InvoiceId;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One async mutex per invoice.
///
/// Held across "compute refundable, then append" and every payment mutation so
/// two requests against the same invoice cannot both pass validation.
#[derive(Debug, Default)]
pub struct InvoiceLocks {
    locks: DashMap<InvoiceId, Arc<Mutex<()>>>,
}

impl InvoiceLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to one invoice.
    pub async fn acquire(&self, invoice_id: InvoiceId) -> OwnedMutexGuard<()> {
        let lock = Arc::clone(self.locks.entry(invoice_id).or_default().value());
        lock.lock_owned().await
    }

    /// Number of invoices that have ever been locked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Returns true if no invoice has been locked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Separates writes from multi-ledger aggregations.
///
/// Mutations share the fence with each other; aggregations hold it
/// exclusively, so a summary never observes half of a refund or payment.
#[derive(Debug, Default)]
pub struct WriteFence {
    inner: RwLock<()>,
}

impl WriteFence {
    /// Creates an open fence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entered by every mutating operation.
    pub async fn mutation(&self) -> RwLockReadGuard<'_, ()> {
        self.inner.read().await
    }

    /// Entered by every aggregation that reads more than one ledger.
    pub async fn snapshot(&self) -> RwLockWriteGuard<'_, ()> {
        self.inner.write().await
    }
}
