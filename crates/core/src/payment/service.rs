//! Payment service: record, edit, remove and list payments.

use std::sync::Arc;

use clinic_shared::types::{ClinicId, PageRequest, PageResponse, PaymentId, paginate};
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use super::types::{CreatePaymentInput, PaymentFilter, UpdatePaymentInput};
use crate::error::{BillingError, BillingResult};
use crate::ledger::{Ledgers, NewPayment, Payment, PaymentQuery};
use crate::sync::{InvoiceLocks, WriteFence};

/// Records payments against invoices, one payment per invoice.
#[derive(Clone)]
pub struct PaymentService {
    ledgers: Ledgers,
    locks: Arc<InvoiceLocks>,
    fence: Arc<WriteFence>,
}

impl PaymentService {
    /// Creates the service over its collaborators.
    #[must_use]
    pub fn new(ledgers: Ledgers, locks: Arc<InvoiceLocks>, fence: Arc<WriteFence>) -> Self {
        Self {
            ledgers,
            locks,
            fence,
        }
    }

    /// Records the payment of an appointment's invoice and marks it paid.
    ///
    /// If marking the invoice paid fails, the new payment is removed again so
    /// no half-recorded payment survives.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvoiceForAppointmentNotFound` if the appointment has no invoice in the clinic.
    /// Returns `BillingError::AlreadyPaid` if the invoice is already settled.
    /// Returns `BillingError::InvalidAmount` if `amount <= 0`.
    pub async fn create_payment(&self, input: CreatePaymentInput) -> BillingResult<Payment> {
        let _fence = self.fence.mutation().await;

        let invoice_id = self
            .ledgers
            .invoices
            .get_by_appointment_id(input.appointment_id)
            .await?
            .filter(|invoice| invoice.clinic_id == input.clinic_id)
            .ok_or(BillingError::InvoiceForAppointmentNotFound(input.appointment_id))?
            .id;

        let _guard = self.locks.acquire(invoice_id).await;

        // Status may have changed while waiting for the guard.
        let invoice = self
            .ledgers
            .invoices
            .get_by_id(invoice_id)
            .await?
            .ok_or(BillingError::InvoiceForAppointmentNotFound(input.appointment_id))?;

        if !invoice.is_unpaid() {
            warn!(invoice_id = %invoice.id, "Payment rejected: invoice already paid");
            return Err(BillingError::AlreadyPaid(invoice.id));
        }

        if input.amount <= Decimal::ZERO {
            warn!(invoice_id = %invoice.id, amount = %input.amount, "Payment rejected: invalid amount");
            return Err(BillingError::InvalidAmount(input.amount));
        }

        let payment = self
            .ledgers
            .payments
            .create(NewPayment {
                clinic_id: invoice.clinic_id,
                invoice_id: invoice.id,
                patient_id: invoice.patient_id,
                appointment_id: invoice.appointment_id,
                amount: input.amount,
                method: input.method,
                created_by: input.created_by,
            })
            .await?;

        if let Err(e) = self.ledgers.invoices.mark_paid(invoice.id).await {
            error!(
                invoice_id = %invoice.id,
                payment_id = %payment.id,
                error = %e,
                "Failed to mark invoice paid, removing payment"
            );
            self.ledgers
                .payments
                .delete_by_invoice_id(invoice.id)
                .await?;
            return Err(e.into());
        }

        info!(
            clinic_id = %payment.clinic_id,
            invoice_id = %payment.invoice_id,
            payment_id = %payment.id,
            amount = %payment.amount,
            method = %payment.method,
            "Payment recorded"
        );

        Ok(payment)
    }

    /// Edits amount and/or method of a payment in place.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::PaymentNotFound` if the payment does not exist.
    /// Returns `BillingError::InvalidAmount` if the new amount is `<= 0`.
    pub async fn update_payment(
        &self,
        payment_id: PaymentId,
        input: UpdatePaymentInput,
    ) -> BillingResult<Payment> {
        let _fence = self.fence.mutation().await;

        let invoice_id = self.require(payment_id).await?.invoice_id;
        let _guard = self.locks.acquire(invoice_id).await;
        let current = self.require(payment_id).await?;

        if let Some(amount) = input.amount
            && amount <= Decimal::ZERO
        {
            warn!(payment_id = %payment_id, amount = %amount, "Payment update rejected: invalid amount");
            return Err(BillingError::InvalidAmount(amount));
        }

        let updated = self
            .ledgers
            .payments
            .update(Payment {
                amount: input.amount.unwrap_or(current.amount),
                method: input.method.unwrap_or(current.method),
                ..current
            })
            .await?;

        info!(
            payment_id = %updated.id,
            invoice_id = %updated.invoice_id,
            amount = %updated.amount,
            method = %updated.method,
            "Payment updated"
        );

        Ok(updated)
    }

    /// Removes a payment and marks its invoice unpaid again.
    ///
    /// The invoice is reopened first. If the payment then cannot be removed,
    /// the invoice is marked paid again so both ledgers stay in step.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::PaymentNotFound` if the payment does not exist.
    pub async fn delete_payment(&self, payment_id: PaymentId) -> BillingResult<Payment> {
        let _fence = self.fence.mutation().await;

        let invoice_id = self.require(payment_id).await?.invoice_id;
        let _guard = self.locks.acquire(invoice_id).await;
        let payment = self.require(payment_id).await?;

        self.ledgers.invoices.mark_unpaid(payment.invoice_id).await?;

        if let Err(e) = self
            .ledgers
            .payments
            .delete_by_invoice_id(payment.invoice_id)
            .await
        {
            error!(
                invoice_id = %payment.invoice_id,
                payment_id = %payment.id,
                error = %e,
                "Failed to remove payment, marking invoice paid again"
            );
            self.ledgers.invoices.mark_paid(payment.invoice_id).await?;
            return Err(e.into());
        }

        info!(
            payment_id = %payment.id,
            invoice_id = %payment.invoice_id,
            "Payment deleted, invoice reopened"
        );

        Ok(payment)
    }

    /// Looks up a payment.
    pub async fn get_payment(&self, payment_id: PaymentId) -> BillingResult<Option<Payment>> {
        Ok(self.ledgers.payments.get_by_id(payment_id).await?)
    }

    /// Lists payments of a clinic, newest first, paginated.
    pub async fn list_payments(
        &self,
        clinic_id: ClinicId,
        filter: PaymentFilter,
        page: PageRequest,
    ) -> BillingResult<PageResponse<Payment>> {
        let mut query = PaymentQuery::for_clinic(clinic_id).days(filter.days);
        if let Some(patient_id) = filter.patient_id {
            query = query.patient(patient_id);
        }

        let payments: Vec<Payment> = self
            .ledgers
            .payments
            .list(&query)
            .await?
            .into_iter()
            .filter(|payment| filter.matches_local(payment))
            .collect();

        Ok(paginate(payments, page))
    }

    async fn require(&self, payment_id: PaymentId) -> BillingResult<Payment> {
        self.ledgers
            .payments
            .get_by_id(payment_id)
            .await?
            .ok_or(BillingError::PaymentNotFound(payment_id))
    }
}
