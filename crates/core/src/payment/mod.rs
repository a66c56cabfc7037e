//! Payment recording on top of the external Payment Ledger.
//!
//! The engine never keeps its own copy of payments. Every operation reads the
//! ledger fresh and writes back through its public contract.

pub mod service;
pub mod types;


pub use service::PaymentService;
pub use types::{CreatePaymentInput, PaymentFilter, UpdatePaymentInput};
