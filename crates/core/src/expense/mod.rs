//! Clinic expenses: an append-only record owned by the engine.

pub mod service;
pub mod store;
pub mod types;

pub use service::ExpenseService;
pub use store::ExpenseStore;
pub use types::{CreateExpenseInput, Expense, ExpenseCategory, ExpenseFilter};
