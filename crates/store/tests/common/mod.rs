//! Shared fixtures for engine tests over the in-memory stores.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use clinic_core::ledger::{
    Invoice, InvoiceLedger, InvoiceQuery, InvoiceStatus, LineItem, NewInvoice, NewPayment,
    Patient, Payment, PaymentLedger, PaymentMethod, PaymentQuery, PaymentStatus, StoreError,
};
use clinic_core::{BillingEngine, Stores};
use clinic_shared::config::{BillingConfig, SettingsDefaults};
use clinic_shared::types::{
    AppointmentId, ClinicId, DoctorId, InvoiceId, PatientId, PaymentId, UserId,
};
use clinic_store::{InMemoryInvoiceLedger, InMemoryPaymentLedger, InMemoryStores};
use rust_decimal::Decimal;

pub struct Fixture {
    pub stores: InMemoryStores,
    pub engine: BillingEngine,
    pub clinic_id: ClinicId,
    pub doctor_id: DoctorId,
    pub user_id: UserId,
}

impl Fixture {
    pub fn new() -> Self {
        Self::wired(InMemoryStores::stores)
    }

    /// Engine over the in-memory stores with the Invoice Ledger failing `fault`.
    pub fn failing_invoices(fault: InvoiceFault) -> Self {
        Self::wired(|stores| {
            let mut wired = stores.stores();
            wired.ledgers.invoices = Arc::new(FailingInvoiceLedger {
                inner: Arc::clone(&stores.invoices),
                fault,
            });
            wired
        })
    }

    /// Engine over the in-memory stores with payment deletion failing.
    pub fn failing_payment_delete() -> Self {
        Self::wired(|stores| {
            let mut wired = stores.stores();
            wired.ledgers.payments = Arc::new(FailingPaymentDelete {
                inner: Arc::clone(&stores.payments),
            });
            wired
        })
    }

    fn wired(wire: impl FnOnce(&InMemoryStores) -> Stores) -> Self {
        let stores = InMemoryStores::new();
        let engine = BillingEngine::new(
            wire(&stores),
            &BillingConfig::default(),
            &SettingsDefaults::default(),
        );

        Self {
            stores,
            engine,
            clinic_id: ClinicId::new(),
            doctor_id: DoctorId::new(),
            user_id: UserId::new(),
        }
    }

    pub async fn patient(&self, name: &str, phone: &str) -> PatientId {
        let id = PatientId::new();
        self.stores
            .patients
            .insert(Patient {
                id,
                name: name.to_string(),
                phone: phone.to_string(),
            })
            .await;
        id
    }

    pub async fn invoice(
        &self,
        patient_id: PatientId,
        amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> Invoice {
        self.invoice_with(patient_id, amount, Vec::new(), InvoiceStatus::Unpaid, created_at)
            .await
    }

    pub async fn invoice_with(
        &self,
        patient_id: PatientId,
        amount: Decimal,
        line_items: Vec<LineItem>,
        status: InvoiceStatus,
        created_at: DateTime<Utc>,
    ) -> Invoice {
        let invoice = Invoice {
            id: InvoiceId::new(),
            clinic_id: self.clinic_id,
            patient_id,
            doctor_id: self.doctor_id,
            appointment_id: Some(AppointmentId::new()),
            appointment_type: Some("consultation".to_string()),
            amount,
            line_items,
            status,
            created_at,
        };
        self.stores.invoices.insert(invoice.clone()).await;
        invoice
    }

    /// Seeds a paid invoice with its payment at a fixed time.
    pub async fn paid_invoice(
        &self,
        patient_id: PatientId,
        amount: Decimal,
        method: PaymentMethod,
        at: DateTime<Utc>,
    ) -> (Invoice, Payment) {
        let invoice = self
            .invoice_with(patient_id, amount, Vec::new(), InvoiceStatus::Paid, at)
            .await;
        let payment = Payment {
            id: PaymentId::new(),
            clinic_id: self.clinic_id,
            invoice_id: invoice.id,
            patient_id,
            appointment_id: invoice.appointment_id,
            amount,
            method,
            status: PaymentStatus::Paid,
            created_by: self.user_id,
            created_at: at,
        };
        self.stores.payments.insert(payment.clone()).await;
        (invoice, payment)
    }
}

/// Invoice Ledger call that `FailingInvoiceLedger` rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceFault {
    CreateWithAmount,
    MarkPaid,
    MarkUnpaid,
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("ledger offline".to_string())
}

/// Delegates to the in-memory ledger except for one failing call.
pub struct FailingInvoiceLedger {
    inner: Arc<InMemoryInvoiceLedger>,
    fault: InvoiceFault,
}

#[async_trait]
impl InvoiceLedger for FailingInvoiceLedger {
    async fn get_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        self.inner.get_by_id(id).await
    }

    async fn get_by_appointment_id(
        &self,
        appointment_id: AppointmentId,
    ) -> Result<Option<Invoice>, StoreError> {
        self.inner.get_by_appointment_id(appointment_id).await
    }

    async fn create_with_amount(&self, input: NewInvoice) -> Result<Invoice, StoreError> {
        if self.fault == InvoiceFault::CreateWithAmount {
            return Err(unavailable());
        }
        self.inner.create_with_amount(input).await
    }

    async fn mark_paid(&self, id: InvoiceId) -> Result<(), StoreError> {
        if self.fault == InvoiceFault::MarkPaid {
            return Err(unavailable());
        }
        self.inner.mark_paid(id).await
    }

    async fn mark_unpaid(&self, id: InvoiceId) -> Result<(), StoreError> {
        if self.fault == InvoiceFault::MarkUnpaid {
            return Err(unavailable());
        }
        self.inner.mark_unpaid(id).await
    }

    async fn list(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, StoreError> {
        self.inner.list(query).await
    }
}

/// Payment Ledger whose `delete_by_invoice_id` always fails.
pub struct FailingPaymentDelete {
    inner: Arc<InMemoryPaymentLedger>,
}

#[async_trait]
impl PaymentLedger for FailingPaymentDelete {
    async fn get_by_id(&self, id: PaymentId) -> Result<Option<Payment>, StoreError> {
        self.inner.get_by_id(id).await
    }

    async fn get_by_invoice_id(&self, invoice_id: InvoiceId) -> Result<Option<Payment>, StoreError> {
        self.inner.get_by_invoice_id(invoice_id).await
    }

    async fn create(&self, input: NewPayment) -> Result<Payment, StoreError> {
        self.inner.create(input).await
    }

    async fn update(&self, payment: Payment) -> Result<Payment, StoreError> {
        self.inner.update(payment).await
    }

    async fn delete_by_invoice_id(&self, _invoice_id: InvoiceId) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, StoreError> {
        self.inner.list(query).await
    }
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}
