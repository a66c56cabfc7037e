//! Wiring of the billing services over one set of stores.

use std::sync::Arc;

use clinic_shared::config::{BillingConfig, SettingsDefaults};

use crate::balance::BalanceService;
use crate::cashier::CashierService;
use crate::expense::{ExpenseService, ExpenseStore};
use crate::ledger::Ledgers;
use crate::payment::PaymentService;
use crate::refund::{RefundService, RefundStore};
use crate::reports::ReportService;
use crate::settings::{SettingsService, SettingsStore};
use crate::sync::{InvoiceLocks, WriteFence};

/// Every store the engine reads or writes.
#[derive(Clone)]
pub struct Stores {
    /// Invoice, Payment and Patient collaborators.
    pub ledgers: Ledgers,
    /// Refund Ledger.
    pub refunds: Arc<dyn RefundStore>,
    /// Expense Store.
    pub expenses: Arc<dyn ExpenseStore>,
    /// Settings Store.
    pub settings: Arc<dyn SettingsStore>,
}

/// The billing engine: all services sharing one lock table and write fence.
#[derive(Clone)]
pub struct BillingEngine {
    /// Refunds and refund summaries.
    pub refunds: RefundService,
    /// Payments.
    pub payments: PaymentService,
    /// Expenses.
    pub expenses: ExpenseService,
    /// Patient balances and histories.
    pub balances: BalanceService,
    /// Daily cashier rows.
    pub cashier: CashierService,
    /// Monthly summaries.
    pub reports: ReportService,
    /// Clinic settings.
    pub settings: SettingsService,
}

impl BillingEngine {
    /// Builds every service over the given stores.
    #[must_use]
    pub fn new(stores: Stores, billing: &BillingConfig, defaults: &SettingsDefaults) -> Self {
        let locks = Arc::new(InvoiceLocks::new());
        let fence = Arc::new(WriteFence::new());
        let Stores {
            ledgers,
            refunds,
            expenses,
            settings,
        } = stores;

        Self {
            refunds: RefundService::new(
                ledgers.clone(),
                refunds,
                Arc::clone(&locks),
                Arc::clone(&fence),
                billing.unknown_patient_name.clone(),
            ),
            payments: PaymentService::new(ledgers.clone(), Arc::clone(&locks), Arc::clone(&fence)),
            expenses: ExpenseService::new(Arc::clone(&expenses), Arc::clone(&fence)),
            balances: BalanceService::new(
                ledgers.clone(),
                Arc::clone(&fence),
                billing.unknown_patient_name.clone(),
                billing.placeholder_phone.clone(),
            ),
            cashier: CashierService::new(
                ledgers.clone(),
                Arc::clone(&fence),
                billing.cashier_row_limit,
                billing.unknown_patient_name.clone(),
            ),
            reports: ReportService::new(ledgers, expenses, fence),
            settings: SettingsService::new(settings, defaults),
        }
    }
}
