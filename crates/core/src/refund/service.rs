//! Refund issuance and refund queries.

use std::sync::Arc;

use chrono::Utc;
use clinic_shared::types::{ClinicId, InvoiceId, PageRequest, PageResponse, RefundId, paginate};
use tracing::{error, info, warn};

use super::store::RefundStore;
use super::summary::RefundCalculator;
use super::types::{CreateRefundInput, InvoiceRefundSummary, Refund, RefundFilter};
use crate::error::{BillingError, BillingResult};
use crate::ledger::{Invoice, Ledgers, NewInvoice};
use crate::sync::{InvoiceLocks, WriteFence};

/// Issues refunds and answers refund queries.
#[derive(Clone)]
pub struct RefundService {
    ledgers: Ledgers,
    refunds: Arc<dyn RefundStore>,
    locks: Arc<InvoiceLocks>,
    fence: Arc<WriteFence>,
    unknown_patient_name: String,
}

impl RefundService {
    /// Creates the service over its collaborators.
    #[must_use]
    pub fn new(
        ledgers: Ledgers,
        refunds: Arc<dyn RefundStore>,
        locks: Arc<InvoiceLocks>,
        fence: Arc<WriteFence>,
        unknown_patient_name: String,
    ) -> Self {
        Self {
            ledgers,
            refunds,
            locks,
            fence,
            unknown_patient_name,
        }
    }

    /// Issues a refund against an invoice.
    ///
    /// Under the invoice's guard: resolves the invoice, recomputes the
    /// refundable ceiling, validates the amount, appends the refund with the
    /// patient's current name, then asks the Invoice Ledger for a follow-up
    /// invoice of the refunded amount for the same clinic, doctor, patient and
    /// appointment. If the follow-up invoice cannot be created the refund is
    /// removed again and the ledger error is returned.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvoiceNotFound` if the invoice does not exist in the clinic.
    /// Returns `BillingError::InvalidAmount` if `amount <= 0`.
    /// Returns `BillingError::RefundExceedsRefundable` if `amount` is above the ceiling.
    pub async fn create_refund(&self, input: CreateRefundInput) -> BillingResult<Refund> {
        let _fence = self.fence.mutation().await;
        let _guard = self.locks.acquire(input.invoice_id).await;

        let invoice = self
            .ledgers
            .invoices
            .get_by_id(input.invoice_id)
            .await?
            .filter(|invoice| invoice.clinic_id == input.clinic_id)
            .ok_or(BillingError::InvoiceNotFound(input.invoice_id))?;

        let summary = self.summarize(&invoice).await?;
        if let Err(err) = RefundCalculator::validate_amount(input.amount, summary.refundable) {
            warn!(
                clinic_id = %input.clinic_id,
                invoice_id = %input.invoice_id,
                amount = %input.amount,
                refundable = %summary.refundable,
                error = %err,
                "Refund rejected"
            );
            return Err(err);
        }

        let patient_name = self
            .ledgers
            .patients
            .find_by_id(invoice.patient_id)
            .await?
            .map_or_else(|| self.unknown_patient_name.clone(), |patient| patient.name);

        let refund = self
            .refunds
            .append(Refund {
                id: RefundId::new(),
                clinic_id: invoice.clinic_id,
                invoice_id: invoice.id,
                patient_id: invoice.patient_id,
                patient_name,
                amount: input.amount,
                method: input.method,
                reason: non_blank(input.reason),
                proof: non_blank(input.proof),
                created_by: input.created_by,
                created_at: Utc::now(),
            })
            .await?;

        let follow_up = match self
            .ledgers
            .invoices
            .create_with_amount(NewInvoice {
                clinic_id: invoice.clinic_id,
                patient_id: invoice.patient_id,
                doctor_id: invoice.doctor_id,
                appointment_id: invoice.appointment_id,
                appointment_type: invoice.appointment_type.clone(),
                amount: refund.amount,
            })
            .await
        {
            Ok(follow_up) => follow_up,
            Err(e) => {
                error!(
                    refund_id = %refund.id,
                    invoice_id = %invoice.id,
                    error = %e,
                    "Failed to create follow-up invoice, removing refund"
                );
                self.refunds.remove(refund.id).await?;
                return Err(e.into());
            }
        };

        info!(
            clinic_id = %refund.clinic_id,
            invoice_id = %refund.invoice_id,
            refund_id = %refund.id,
            follow_up_invoice_id = %follow_up.id,
            amount = %refund.amount,
            method = %refund.method,
            "Refund issued"
        );

        Ok(refund)
    }

    /// Computes the refund position of an invoice, or `None` if it does not exist.
    pub async fn invoice_refund_summary(
        &self,
        invoice_id: InvoiceId,
    ) -> BillingResult<Option<InvoiceRefundSummary>> {
        let _guard = self.locks.acquire(invoice_id).await;

        let Some(invoice) = self.ledgers.invoices.get_by_id(invoice_id).await? else {
            return Ok(None);
        };

        self.summarize(&invoice).await.map(Some)
    }

    /// All refunds of an invoice, newest first.
    pub async fn list_refunds_by_invoice(&self, invoice_id: InvoiceId) -> BillingResult<Vec<Refund>> {
        let mut refunds = self.refunds.list_by_invoice(invoice_id).await?;
        RefundCalculator::sort_newest_first(&mut refunds);
        Ok(refunds)
    }

    /// Refunds of a clinic within inclusive day bounds, newest first, paginated.
    pub async fn list_refunds(
        &self,
        clinic_id: ClinicId,
        filter: RefundFilter,
        page: PageRequest,
    ) -> BillingResult<PageResponse<Refund>> {
        let mut refunds: Vec<Refund> = self
            .refunds
            .list_by_clinic(clinic_id)
            .await?
            .into_iter()
            .filter(|refund| filter.days.contains(refund.created_at))
            .collect();

        RefundCalculator::sort_newest_first(&mut refunds);
        Ok(paginate(refunds, page))
    }

    async fn summarize(&self, invoice: &Invoice) -> BillingResult<InvoiceRefundSummary> {
        let (payment, refunds) = futures::try_join!(
            self.ledgers.payments.get_by_invoice_id(invoice.id),
            self.refunds.list_by_invoice(invoice.id),
        )?;

        Ok(RefundCalculator::summarize(invoice, payment.as_ref(), &refunds))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
