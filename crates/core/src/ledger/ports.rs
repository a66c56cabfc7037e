//! Ports to the external ledgers.
//!
//! Implementations may be backed by any store. `list` results are returned
//! newest first by `created_at`.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use clinic_shared::types::{AppointmentId, ClinicId, DayRange, InvoiceId, PatientId, PaymentId};
use futures::future::try_join_all;

use super::error::StoreError;
use super::types::{Invoice, InvoiceStatus, NewInvoice, NewPayment, Patient, Payment};

/// Filters for `InvoiceLedger::list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceQuery {
    /// Owning clinic.
    pub clinic_id: ClinicId,
    /// Restrict to one patient.
    pub patient_id: Option<PatientId>,
    /// Restrict to one status.
    pub status: Option<InvoiceStatus>,
    /// Creation day bounds, inclusive.
    pub days: DayRange,
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
}

impl InvoiceQuery {
    /// All invoices of a clinic.
    #[must_use]
    pub fn for_clinic(clinic_id: ClinicId) -> Self {
        Self {
            clinic_id,
            patient_id: None,
            status: None,
            days: DayRange::unbounded(),
            limit: None,
        }
    }

    /// Unpaid invoices of a clinic.
    #[must_use]
    pub fn unpaid(clinic_id: ClinicId) -> Self {
        Self {
            status: Some(InvoiceStatus::Unpaid),
            ..Self::for_clinic(clinic_id)
        }
    }

    /// Restricts to one patient.
    #[must_use]
    pub fn patient(mut self, patient_id: PatientId) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    /// Restricts creation day.
    #[must_use]
    pub fn days(mut self, days: DayRange) -> Self {
        self.days = days;
        self
    }

    /// Caps the number of rows.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether an invoice satisfies every filter except `limit`.
    #[must_use]
    pub fn matches(&self, invoice: &Invoice) -> bool {
        invoice.clinic_id == self.clinic_id
            && self.patient_id.is_none_or(|p| invoice.patient_id == p)
            && self.status.is_none_or(|s| invoice.status == s)
            && self.days.contains(invoice.created_at)
    }
}

/// Filters for `PaymentLedger::list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentQuery {
    /// Owning clinic.
    pub clinic_id: ClinicId,
    /// Restrict to one patient.
    pub patient_id: Option<PatientId>,
    /// Creation day bounds, inclusive.
    pub days: DayRange,
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
}

impl PaymentQuery {
    /// All payments of a clinic.
    #[must_use]
    pub fn for_clinic(clinic_id: ClinicId) -> Self {
        Self {
            clinic_id,
            patient_id: None,
            days: DayRange::unbounded(),
            limit: None,
        }
    }

    /// Restricts to one patient.
    #[must_use]
    pub fn patient(mut self, patient_id: PatientId) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    /// Restricts creation day.
    #[must_use]
    pub fn days(mut self, days: DayRange) -> Self {
        self.days = days;
        self
    }

    /// Caps the number of rows.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a payment satisfies every filter except `limit`.
    #[must_use]
    pub fn matches(&self, payment: &Payment) -> bool {
        payment.clinic_id == self.clinic_id
            && self.patient_id.is_none_or(|p| payment.patient_id == p)
            && self.days.contains(payment.created_at)
    }
}

/// Owner of invoice records and their paid/unpaid status.
#[async_trait]
pub trait InvoiceLedger: Send + Sync {
    /// Looks up an invoice.
    async fn get_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError>;

    /// Looks up the invoice raised for an appointment.
    async fn get_by_appointment_id(
        &self,
        appointment_id: AppointmentId,
    ) -> Result<Option<Invoice>, StoreError>;

    /// Creates a new unpaid invoice with a flat amount.
    async fn create_with_amount(&self, input: NewInvoice) -> Result<Invoice, StoreError>;

    /// Marks an invoice paid.
    async fn mark_paid(&self, id: InvoiceId) -> Result<(), StoreError>;

    /// Marks an invoice unpaid.
    async fn mark_unpaid(&self, id: InvoiceId) -> Result<(), StoreError>;

    /// Lists invoices matching the query, newest first.
    async fn list(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, StoreError>;
}

/// Owner of payment records, one per invoice.
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Looks up a payment.
    async fn get_by_id(&self, id: PaymentId) -> Result<Option<Payment>, StoreError>;

    /// Looks up the payment settling an invoice.
    async fn get_by_invoice_id(&self, invoice_id: InvoiceId) -> Result<Option<Payment>, StoreError>;

    /// Records a payment. Fails with `Conflict` if the invoice already has one.
    async fn create(&self, input: NewPayment) -> Result<Payment, StoreError>;

    /// Replaces the amount and method of an existing payment.
    async fn update(&self, payment: Payment) -> Result<Payment, StoreError>;

    /// Removes the payment of an invoice. Returns whether one existed.
    async fn delete_by_invoice_id(&self, invoice_id: InvoiceId) -> Result<bool, StoreError>;

    /// Lists payments matching the query, newest first.
    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, StoreError>;
}

/// Read-only patient lookup.
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    /// Finds a patient's display details.
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, StoreError>;
}

/// The three external collaborators, shared by every service.
#[derive(Clone)]
pub struct Ledgers {
    /// Invoice Ledger.
    pub invoices: Arc<dyn InvoiceLedger>,
    /// Payment Ledger.
    pub payments: Arc<dyn PaymentLedger>,
    /// Patient Directory.
    pub patients: Arc<dyn PatientDirectory>,
}

impl Ledgers {
    /// Resolves many patients concurrently, one directory call per distinct id.
    ///
    /// Patients the directory does not know are absent from the map.
    pub async fn resolve_patients(
        &self,
        ids: impl IntoIterator<Item = PatientId>,
    ) -> Result<HashMap<PatientId, Patient>, StoreError> {
        let distinct: BTreeSet<PatientId> = ids.into_iter().collect();
        let found = try_join_all(
            distinct
                .into_iter()
                .map(|id| self.patients.find_by_id(id)),
        )
        .await?;

        Ok(found
            .into_iter()
            .flatten()
            .map(|patient| (patient.id, patient))
            .collect())
    }
}
