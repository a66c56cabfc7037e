//! Refund ledger and refund summary.
//!
//! Refunds are append-only and scoped to one invoice. The amount still
//! refundable on an invoice is always recomputed from the Payment Ledger and
//! the refunds recorded so far; it is never stored.

pub mod service;
pub mod store;
pub mod summary;
pub mod types;


pub use service::RefundService;
pub use store::RefundStore;
pub use summary::RefundCalculator;
pub use types::{CreateRefundInput, InvoiceRefundSummary, Refund, RefundFilter};
