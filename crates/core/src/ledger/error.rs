//! Errors returned by store and ledger ports.

use thiserror::Error;

/// Errors a backing store can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record the operation depends on does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The write would break a store invariant (e.g. a second payment for one invoice).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The store could not be reached or failed internally.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
