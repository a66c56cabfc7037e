//! In-memory repositories, one per port.

pub mod expense;
pub mod invoice;
pub mod patient;
pub mod payment;
pub mod refund;
pub mod settings;

pub use expense::InMemoryExpenseStore;
pub use invoice::InMemoryInvoiceLedger;
pub use patient::InMemoryPatientDirectory;
pub use payment::InMemoryPaymentLedger;
pub use refund::InMemoryRefundStore;
pub use settings::InMemorySettingsStore;
