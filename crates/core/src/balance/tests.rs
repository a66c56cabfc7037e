//! Property-based tests for balance aggregation.

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use clinic_shared::types::{ClinicId, DoctorId, InvoiceId, PatientId, PaymentId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::aggregator::BalanceAggregator;
use super::types::{BalanceQuery, PatientBalance};
use crate::ledger::{Invoice, InvoiceStatus, Patient, Payment, PaymentMethod, PaymentStatus};

fn at(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap() + Duration::hours(hours)
}

fn unpaid(patient_id: PatientId, amount: Decimal, created_at: DateTime<Utc>) -> Invoice {
    Invoice {
        id: InvoiceId::new(),
        clinic_id: ClinicId::new(),
        patient_id,
        doctor_id: DoctorId::new(),
        appointment_id: None,
        appointment_type: None,
        amount,
        line_items: Vec::new(),
        status: InvoiceStatus::Unpaid,
        created_at,
    }
}

fn paid(patient_id: PatientId, amount: Decimal, created_at: DateTime<Utc>) -> Payment {
    Payment {
        id: PaymentId::new(),
        clinic_id: ClinicId::new(),
        invoice_id: InvoiceId::new(),
        patient_id,
        appointment_id: None,
        amount,
        method: PaymentMethod::Cash,
        status: PaymentStatus::Paid,
        created_by: UserId::new(),
        created_at,
    }
}

fn balance(name: &str, phone: &str, due: Decimal, last_visit: Option<DateTime<Utc>>) -> PatientBalance {
    PatientBalance {
        patient_id: PatientId::new(),
        patient_name: name.to_string(),
        phone: phone.to_string(),
        total_due: due,
        last_visit,
        last_payment: None,
    }
}

proptest! {
    /// total_due is the sum of unpaid invoice amounts; payments never change it
    #[test]
    fn test_total_due_ignores_payments(
        invoice_amounts in prop::collection::vec(0i64..100_000, 0..10),
        payment_amounts in prop::collection::vec(1i64..100_000, 0..10),
    ) {
        let patient_id = PatientId::new();
        let invoices: Vec<Invoice> = invoice_amounts
            .iter()
            .map(|a| unpaid(patient_id, Decimal::from(*a), at(0)))
            .collect();
        let payments: Vec<Payment> = payment_amounts
            .iter()
            .map(|a| paid(patient_id, Decimal::from(*a), at(1)))
            .collect();

        let tallies = BalanceAggregator::fold(&payments, &invoices);
        let expected: Decimal = invoice_amounts.iter().map(|a| Decimal::from(*a)).sum();

        if invoices.is_empty() && payments.is_empty() {
            prop_assert!(tallies.is_empty());
        } else {
            prop_assert_eq!(tallies[&patient_id].total_due, expected);
        }
    }

    /// last_visit is the latest timestamp across both sources
    #[test]
    fn test_last_visit_is_latest_activity(
        invoice_hours in prop::collection::vec(0i64..1_000, 1..10),
        payment_hours in prop::collection::vec(0i64..1_000, 0..10),
    ) {
        let patient_id = PatientId::new();
        let invoices: Vec<Invoice> = invoice_hours.iter().map(|h| unpaid(patient_id, dec!(10), at(*h))).collect();
        let payments: Vec<Payment> = payment_hours.iter().map(|h| paid(patient_id, dec!(10), at(*h))).collect();

        let tally = &BalanceAggregator::fold(&payments, &invoices)[&patient_id];
        let latest = invoice_hours.iter().chain(payment_hours.iter()).max().map(|h| at(*h));

        prop_assert_eq!(tally.last_visit, latest);
        prop_assert_eq!(tally.last_payment, payment_hours.iter().max().map(|h| at(*h)));
    }
}

mod unit_tests {
    use super::*;

    #[test]
    fn test_unpaid_only_patient_owes_sum() {
        let owing = PatientId::new();
        let settled = PatientId::new();
        let invoices = vec![unpaid(owing, dec!(100), at(0)), unpaid(owing, dec!(50), at(2))];
        let payments = vec![paid(settled, dec!(80), at(1))];

        let tallies = BalanceAggregator::fold(&payments, &invoices);

        assert_eq!(tallies[&owing].total_due, dec!(150));
        assert_eq!(tallies[&owing].last_payment, None);
        assert_eq!(tallies[&settled].total_due, Decimal::ZERO);
        assert_eq!(tallies[&settled].last_payment, Some(at(1)));
    }

    #[test]
    fn test_paid_invoices_are_ignored() {
        let patient_id = PatientId::new();
        let mut invoice = unpaid(patient_id, dec!(70), at(0));
        invoice.status = InvoiceStatus::Paid;

        assert!(BalanceAggregator::fold(&[], &[invoice]).is_empty());
    }

    #[test]
    fn test_resolve_uses_placeholders_for_unknown_patients() {
        let known = PatientId::new();
        let unknown = PatientId::new();
        let tallies = BalanceAggregator::fold(
            &[],
            &[unpaid(known, dec!(10), at(0)), unpaid(unknown, dec!(20), at(0))],
        );
        let patients = HashMap::from([(
            known,
            Patient {
                id: known,
                name: "Amira Haddad".to_string(),
                phone: "+961 3 123 456".to_string(),
            },
        )]);

        let balances = BalanceAggregator::resolve(tallies, &patients, "Unknown patient", "N/A");
        let by_id: HashMap<PatientId, &PatientBalance> =
            balances.iter().map(|b| (b.patient_id, b)).collect();

        assert_eq!(by_id[&known].patient_name, "Amira Haddad");
        assert_eq!(by_id[&unknown].patient_name, "Unknown patient");
        assert_eq!(by_id[&unknown].phone, "N/A");
    }

    #[test]
    fn test_filter_query_is_case_insensitive_on_name_or_phone() {
        let balances = vec![
            balance("Amira Haddad", "555-0101", dec!(10), None),
            balance("Jonas Berg", "555-0199", Decimal::ZERO, None),
        ];

        let by_name = BalanceAggregator::filter(
            balances.clone(),
            &BalanceQuery {
                query: Some("HADD".to_string()),
                only_with_balance: false,
            },
        );
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].patient_name, "Amira Haddad");

        let by_phone = BalanceAggregator::filter(
            balances.clone(),
            &BalanceQuery {
                query: Some("0199".to_string()),
                only_with_balance: false,
            },
        );
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].patient_name, "Jonas Berg");

        let blank = BalanceAggregator::filter(
            balances,
            &BalanceQuery {
                query: Some("   ".to_string()),
                only_with_balance: false,
            },
        );
        assert_eq!(blank.len(), 2);
    }

    #[test]
    fn test_filter_only_with_balance() {
        let balances = vec![
            balance("A", "1", dec!(10), None),
            balance("B", "2", Decimal::ZERO, None),
        ];

        let owing = BalanceAggregator::filter(
            balances,
            &BalanceQuery {
                query: None,
                only_with_balance: true,
            },
        );

        assert_eq!(owing.len(), 1);
        assert_eq!(owing[0].patient_name, "A");
    }

    #[test]
    fn test_sort_puts_recent_first_and_missing_last() {
        let mut balances = vec![
            balance("never", "1", dec!(1), None),
            balance("old", "2", dec!(1), Some(at(1))),
            balance("new", "3", dec!(1), Some(at(5))),
        ];

        BalanceAggregator::sort_by_last_visit(&mut balances);

        let names: Vec<&str> = balances.iter().map(|b| b.patient_name.as_str()).collect();
        assert_eq!(names, vec!["new", "old", "never"]);
    }
}
