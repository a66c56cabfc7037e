//! Daily cashier ledger: paid payments and unpaid charges of one clinic-day.

pub mod builder;
pub mod service;
pub mod types;

pub use builder::CashierViewBuilder;
pub use service::CashierService;
pub use types::{CashierRow, CashierRowKind};
