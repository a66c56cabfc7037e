//! Payment recording against the in-memory ledgers.

mod common;

use chrono::Utc;
use clinic_core::BillingError;
use clinic_core::ledger::{
    InvoiceLedger, PaymentLedger, PaymentMethod, PaymentStatus, StoreError,
};
use clinic_core::payment::{CreatePaymentInput, PaymentFilter, UpdatePaymentInput};
use clinic_shared::types::{AppointmentId, ClinicId, PageRequest, PaymentId};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{Fixture, InvoiceFault};

fn payment_input(fx: &Fixture, appointment_id: AppointmentId, amount: Decimal) -> CreatePaymentInput {
    CreatePaymentInput {
        clinic_id: fx.clinic_id,
        appointment_id,
        amount,
        method: PaymentMethod::Card,
        created_by: fx.user_id,
    }
}

#[tokio::test]
async fn test_create_payment_marks_invoice_paid() {
    let fx = Fixture::new();
    let patient = fx.patient("Eva Novak", "555-0300").await;
    let invoice = fx.invoice(patient, dec!(120), Utc::now()).await;
    let appointment_id = invoice.appointment_id.unwrap();

    let payment = fx
        .engine
        .payments
        .create_payment(payment_input(&fx, appointment_id, dec!(120)))
        .await
        .unwrap();

    assert_eq!(payment.invoice_id, invoice.id);
    assert_eq!(payment.patient_id, patient);
    assert_eq!(payment.status, PaymentStatus::Paid);

    let stored = fx.stores.invoices.get_by_id(invoice.id).await.unwrap().unwrap();
    assert!(!stored.is_unpaid());

    let again = fx
        .engine
        .payments
        .create_payment(payment_input(&fx, appointment_id, dec!(120)))
        .await
        .unwrap_err();
    assert!(matches!(again, BillingError::AlreadyPaid(id) if id == invoice.id));
}

#[tokio::test]
async fn test_create_payment_rejections() {
    let fx = Fixture::new();
    let patient = fx.patient("Leo Park", "555-0301").await;
    let invoice = fx.invoice(patient, dec!(40), Utc::now()).await;
    let appointment_id = invoice.appointment_id.unwrap();

    let unknown = fx
        .engine
        .payments
        .create_payment(payment_input(&fx, AppointmentId::new(), dec!(40)))
        .await
        .unwrap_err();
    assert!(matches!(unknown, BillingError::InvoiceForAppointmentNotFound(_)));

    let other_clinic = fx
        .engine
        .payments
        .create_payment(CreatePaymentInput {
            clinic_id: ClinicId::new(),
            ..payment_input(&fx, appointment_id, dec!(40))
        })
        .await
        .unwrap_err();
    assert!(matches!(other_clinic, BillingError::InvoiceForAppointmentNotFound(_)));

    let zero = fx
        .engine
        .payments
        .create_payment(payment_input(&fx, appointment_id, Decimal::ZERO))
        .await
        .unwrap_err();
    assert!(matches!(zero, BillingError::InvalidAmount(_)));

    let stored = fx.stores.invoices.get_by_id(invoice.id).await.unwrap().unwrap();
    assert!(stored.is_unpaid());
}

#[rstest]
#[case(dec!(0))]
#[case(dec!(-0.01))]
#[case(dec!(-250))]
#[tokio::test]
async fn test_non_positive_amount_leaves_invoice_open(#[case] amount: Decimal) {
    let fx = Fixture::new();
    let patient = fx.patient("Ivo Marek", "555-0306").await;
    let invoice = fx.invoice(patient, dec!(90), Utc::now()).await;

    let err = fx
        .engine
        .payments
        .create_payment(payment_input(&fx, invoice.appointment_id.unwrap(), amount))
        .await
        .unwrap_err();

    assert!(matches!(err, BillingError::InvalidAmount(a) if a == amount));
    assert!(fx.stores.payments.get_by_invoice_id(invoice.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_payment_changes_amount_and_method() {
    let fx = Fixture::new();
    let patient = fx.patient("Rui Costa", "555-0302").await;
    let invoice = fx.invoice(patient, dec!(60), Utc::now()).await;
    let payment = fx
        .engine
        .payments
        .create_payment(payment_input(&fx, invoice.appointment_id.unwrap(), dec!(60)))
        .await
        .unwrap();

    let updated = fx
        .engine
        .payments
        .update_payment(
            payment.id,
            UpdatePaymentInput {
                amount: Some(dec!(55)),
                method: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, dec!(55));
    assert_eq!(updated.method, PaymentMethod::Card);

    let updated = fx
        .engine
        .payments
        .update_payment(
            payment.id,
            UpdatePaymentInput {
                amount: None,
                method: Some(PaymentMethod::MobileWallet),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, dec!(55));
    assert_eq!(updated.method, PaymentMethod::MobileWallet);

    let invalid = fx
        .engine
        .payments
        .update_payment(
            payment.id,
            UpdatePaymentInput {
                amount: Some(dec!(-1)),
                method: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(invalid, BillingError::InvalidAmount(_)));

    let missing = fx
        .engine
        .payments
        .update_payment(PaymentId::new(), UpdatePaymentInput::default())
        .await
        .unwrap_err();
    assert!(matches!(missing, BillingError::PaymentNotFound(_)));
}

#[tokio::test]
async fn test_delete_payment_reopens_invoice() {
    let fx = Fixture::new();
    let patient = fx.patient("Zoe Hart", "555-0303").await;
    let invoice = fx.invoice(patient, dec!(80), Utc::now()).await;
    let appointment_id = invoice.appointment_id.unwrap();
    let payment = fx
        .engine
        .payments
        .create_payment(payment_input(&fx, appointment_id, dec!(80)))
        .await
        .unwrap();

    fx.engine.payments.delete_payment(payment.id).await.unwrap();

    assert!(fx.engine.payments.get_payment(payment.id).await.unwrap().is_none());
    let stored = fx.stores.invoices.get_by_id(invoice.id).await.unwrap().unwrap();
    assert!(stored.is_unpaid());

    // The invoice can be paid again.
    fx.engine
        .payments
        .create_payment(payment_input(&fx, appointment_id, dec!(80)))
        .await
        .unwrap();

    let missing = fx
        .engine
        .payments
        .delete_payment(PaymentId::new())
        .await
        .unwrap_err();
    assert!(matches!(missing, BillingError::PaymentNotFound(_)));
}

#[tokio::test]
async fn test_create_payment_removes_payment_when_invoice_cannot_be_marked_paid() {
    let fx = Fixture::failing_invoices(InvoiceFault::MarkPaid);
    let patient = fx.patient("Ines Costa", "555-0305").await;
    let invoice = fx.invoice(patient, dec!(90), Utc::now()).await;

    let err = fx
        .engine
        .payments
        .create_payment(payment_input(&fx, invoice.appointment_id.unwrap(), dec!(90)))
        .await
        .unwrap_err();

    assert!(matches!(err, BillingError::Store(StoreError::Unavailable(_))));
    assert!(fx.stores.payments.get_by_invoice_id(invoice.id).await.unwrap().is_none());
    let stored = fx.stores.invoices.get_by_id(invoice.id).await.unwrap().unwrap();
    assert!(stored.is_unpaid());
}

#[rstest]
#[case::invoice_cannot_reopen(Fixture::failing_invoices(InvoiceFault::MarkUnpaid))]
#[case::payment_cannot_be_removed(Fixture::failing_payment_delete())]
#[tokio::test]
async fn test_failed_delete_keeps_invoice_settled(#[case] fx: Fixture) {
    let patient = fx.patient("Omar Saleh", "555-0306").await;
    let (invoice, payment) = fx
        .paid_invoice(patient, dec!(70), PaymentMethod::Cash, Utc::now())
        .await;

    let err = fx
        .engine
        .payments
        .delete_payment(payment.id)
        .await
        .unwrap_err();

    assert!(matches!(err, BillingError::Store(StoreError::Unavailable(_))));
    let kept = fx.stores.payments.get_by_id(payment.id).await.unwrap().unwrap();
    assert_eq!(kept.amount, dec!(70));
    let stored = fx.stores.invoices.get_by_id(invoice.id).await.unwrap().unwrap();
    assert!(!stored.is_unpaid());
}

#[tokio::test]
async fn test_list_payments_filters_and_paginates() {
    let fx = Fixture::new();
    let alice = fx.patient("Alice", "555-0304").await;
    let bob = fx.patient("Bob", "555-0305").await;
    let (first, _) = fx
        .paid_invoice(alice, dec!(10), PaymentMethod::Cash, common::at(2024, 4, 1, 9))
        .await;
    fx.paid_invoice(alice, dec!(20), PaymentMethod::Cash, common::at(2024, 4, 2, 9))
        .await;
    fx.paid_invoice(bob, dec!(30), PaymentMethod::Card, common::at(2024, 4, 3, 9))
        .await;

    let all = fx
        .engine
        .payments
        .list_payments(fx.clinic_id, PaymentFilter::default(), PageRequest::new(1, 2))
        .await
        .unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.items.len(), 2);
    assert!(all.has_more);
    assert_eq!(all.items[0].amount, dec!(30));

    let alices = fx
        .engine
        .payments
        .list_payments(
            fx.clinic_id,
            PaymentFilter {
                patient_id: Some(alice),
                ..PaymentFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(alices.total, 2);

    let by_appointment = fx
        .engine
        .payments
        .list_payments(
            fx.clinic_id,
            PaymentFilter {
                appointment_id: first.appointment_id,
                ..PaymentFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_appointment.total, 1);
    assert_eq!(by_appointment.items[0].invoice_id, first.id);

    let unpaid = fx
        .engine
        .payments
        .list_payments(
            fx.clinic_id,
            PaymentFilter {
                status: Some(PaymentStatus::Unpaid),
                ..PaymentFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(unpaid.total, 0);
}
