//! Billing reconciliation logic for the clinic engine.
//!
//! This crate turns a small set of append-only financial facts (invoices,
//! payments, refunds, expenses) into consistent derived views. Invoices and
//! payments are owned by external ledgers reached through the ports in
//! [`ledger`]; refunds, expenses and settings are owned here and persisted
//! through the store traits each module declares.
//!
//! # Modules
//!
//! - `ledger` - Invoice/Payment Ledger and Patient Directory ports
//! - `refund` - Refund ledger, refund summary and refund issuance
//! - `payment` - Payment recording on top of the Payment Ledger
//! - `expense` - Clinic expense store
//! - `balance` - Per-patient balance aggregation
//! - `cashier` - Daily cashier view
//! - `reports` - Monthly financial summary
//! - `settings` - Per-clinic accounting and integration settings
//! - `engine` - Wiring of all services over injected stores

pub mod balance;
pub mod cashier;
pub mod engine;
pub mod error;
pub mod expense;
pub mod ledger;
pub mod payment;
pub mod refund;
pub mod reports;
pub mod settings;
pub mod sync;

pub use engine::{BillingEngine, Stores};
pub use error::{BillingError, BillingResult};
