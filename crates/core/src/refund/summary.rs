//! Refund summary and validation rules.

use rust_decimal::Decimal;

use super::types::{InvoiceRefundSummary, Refund};
use crate::error::BillingError;
use crate::ledger::{Invoice, Payment};

/// Pure refund calculations.
pub struct RefundCalculator;

impl RefundCalculator {
    /// Computes the refund position of an invoice.
    ///
    /// `refundable` is floored at zero even though issuance never lets refunds
    /// exceed the paid amount.
    #[must_use]
    pub fn summarize(
        invoice: &Invoice,
        payment: Option<&Payment>,
        refunds: &[Refund],
    ) -> InvoiceRefundSummary {
        let invoice_paid = payment.map_or(Decimal::ZERO, |p| p.amount);
        let invoice_refunded: Decimal = refunds.iter().map(|r| r.amount).sum();

        InvoiceRefundSummary {
            invoice_id: invoice.id,
            invoice_total: invoice.total(),
            invoice_paid,
            invoice_refunded,
            refundable: (invoice_paid - invoice_refunded).max(Decimal::ZERO),
        }
    }

    /// Checks a requested refund amount against the current ceiling.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidAmount` if `amount <= 0`.
    /// Returns `BillingError::RefundExceedsRefundable` if `amount > refundable`.
    pub fn validate_amount(amount: Decimal, refundable: Decimal) -> Result<(), BillingError> {
        if amount <= Decimal::ZERO {
            return Err(BillingError::InvalidAmount(amount));
        }

        if amount > refundable {
            return Err(BillingError::RefundExceedsRefundable {
                requested: amount,
                refundable,
            });
        }

        Ok(())
    }

    /// Sorts refunds newest first; ties fall back to the time-ordered id.
    pub fn sort_newest_first(refunds: &mut [Refund]) {
        refunds.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
    }
}
