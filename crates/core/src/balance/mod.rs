//! Per-patient balances and payment history.

pub mod aggregator;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use aggregator::{BalanceAggregator, BalanceTally};
pub use service::BalanceService;
pub use types::{BalanceQuery, PatientBalance, PatientPaymentHistory};
