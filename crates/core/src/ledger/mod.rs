//! External Invoice Ledger, Payment Ledger and Patient Directory.
//!
//! The engine never keeps its own copy of invoice or payment state. Every
//! read goes to these ports, and the only writes it issues are calls to
//! their public contracts (mark paid/unpaid, create a follow-up invoice,
//! record/update/delete a payment).

pub mod error;
pub mod ports;
pub mod types;

pub use error::StoreError;
pub use ports::{InvoiceLedger, InvoiceQuery, Ledgers, PatientDirectory, PaymentLedger, PaymentQuery};
pub use types::{
    Invoice, InvoiceStatus, LineItem, NewInvoice, NewPayment, Patient, Payment, PaymentMethod,
    PaymentStatus,
};
