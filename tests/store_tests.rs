// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook::db::Store;
use tallybook::installments::expand;
use tallybook::models::{Car, Category, General, Ledger, Loan, LoanKind, LoanStatus, Record};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn car(id: i64, amount: &str) -> Record<Car> {
    Record::new(
        id,
        format!("car {}", id),
        dec(amount),
        Car {
            category: "fuel".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1),
            mileage: None,
        },
    )
}

// Shape written by the original browser front-end, including its quirks:
// empty date strings, null interest and string mileage.
const LEGACY: &str = r#"{
  "loans": [
    {"id": 1717000000000, "description": "To Ana", "amount": 100, "type": "lent",
     "interest": 10, "dueDate": "", "status": "pending", "createdAt": "2024-05-29T16:26:40.000Z"},
    {"id": 1717000000100, "description": "Bank", "amount": 50, "type": "borrowed",
     "interest": null, "dueDate": "2024-07-10", "status": "overdue",
     "createdAt": "2024-05-29T16:26:40.100Z", "isInstallment": true, "installmentNumber": 1,
     "totalInstallments": 2, "installmentDate": "2024-07-10", "parentId": 1717000000099,
     "originalAmount": 100}
  ],
  "fixed": [
    {"id": 5, "description": "Rent", "amount": 1200.5, "category": "rent", "dueDay": 10,
     "createdAt": "2024-05-29T16:26:40.000Z"}
  ],
  "car": [
    {"id": 6, "description": "Fuel", "amount": 80, "category": "fuel", "date": "2024-05-02",
     "mileage": "40210", "createdAt": "2024-05-29T16:26:40.000Z"}
  ]
}"#;

#[test]
fn records_keep_insertion_order() {
    let mut store = Store::open_in_memory().unwrap();
    store.add_records(&[car(3, "10"), car(1, "20")]).unwrap();
    store.add_record(&car(2, "30")).unwrap();
    let ids: Vec<i64> = store.records::<Car>().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert!(store.records::<General>().unwrap().is_empty());
}

#[test]
fn remove_matches_id_within_collection() {
    let mut store = Store::open_in_memory().unwrap();
    store.add_records(&[car(1, "10"), car(2, "20")]).unwrap();
    assert_eq!(store.remove_record(Category::General, 1).unwrap(), 0);
    assert_eq!(store.remove_record(Category::Car, 1).unwrap(), 1);
    let left = store.records::<Car>().unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, 2);
}

#[test]
fn replace_all_swaps_everything() {
    let mut store = Store::open_in_memory().unwrap();
    store.add_records(&[car(1, "10")]).unwrap();
    let ledger: Ledger = serde_json::from_str(LEGACY).unwrap();
    store.replace_all(&ledger).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.count(Category::Loans), 2);
    assert_eq!(loaded.count(Category::Fixed), 1);
    assert_eq!(loaded.count(Category::Car), 1);
    assert_eq!(loaded.car[0].id, 6);
    assert_eq!(loaded.fixed[0].amount, dec("1200.5"));
}

#[test]
fn reserved_ids_climb_above_imported_ones() {
    let mut store = Store::open_in_memory().unwrap();
    let a = store.reserve_ids(3).unwrap();
    let b = store.reserve_ids(1).unwrap();
    assert_eq!(b, a + 3);

    let ledger: Ledger = serde_json::from_str(LEGACY).unwrap();
    store.replace_all(&ledger).unwrap();
    let c = store.reserve_ids(1).unwrap();
    assert_eq!(c, 1717000000101);
    assert_eq!(store.reserve_ids(1).unwrap(), c + 1);
}

#[test]
fn legacy_document_parses_leniently() {
    let ledger: Ledger = serde_json::from_str(LEGACY).unwrap();
    assert!(ledger.general.is_empty());

    let plain = &ledger.loans[0];
    assert!(!plain.is_installment());
    assert_eq!(plain.details.due_date, None);
    assert_eq!(plain.details.kind, LoanKind::Lent);
    assert_eq!(plain.bucket_date(), None);

    let inst = &ledger.loans[1];
    assert_eq!(inst.details.interest, None);
    assert_eq!(inst.details.status, LoanStatus::Overdue);
    let meta = inst.installment().unwrap();
    assert_eq!(meta.parent_id, 1717000000099);
    assert_eq!(meta.original_amount, dec("100"));

    assert_eq!(ledger.car[0].details.mileage.as_deref(), Some("40210"));
    assert_eq!(ledger.fixed[0].details.due_day, Some(10));
}

#[test]
fn serialized_records_use_camel_case_fields() {
    let rec = Record::new(
        9,
        "Bank",
        dec("75"),
        Loan {
            kind: LoanKind::Borrowed,
            interest: Some(dec("1")),
            due_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            status: LoanStatus::Paid,
        },
    );
    let v = serde_json::to_value(&rec).unwrap();
    assert_eq!(v["type"], "borrowed");
    assert_eq!(v["dueDate"], "2024-02-01");
    assert_eq!(v["status"], "paid");
    assert_eq!(v["amount"], "75");
    assert_eq!(v["interest"], "1");
    assert!(v.get("isInstallment").is_none());
}

#[test]
fn uneven_split_loads_back_exactly() {
    let mut store = Store::open_in_memory().unwrap();
    let base = Record::new(
        40,
        "Sofa",
        dec("100"),
        General {
            category: "shopping".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
        },
    );
    let items = expand(&base, 3, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 41).unwrap();
    assert_eq!(items[0].amount, dec("33.333333333333333333333333333"));
    store.add_records(&items).unwrap();

    let back = store.records::<General>().unwrap();
    assert_eq!(back, items);
    let total: Decimal = back.iter().map(|r| r.amount).sum();
    assert_eq!(total, dec("99.999999999999999999999999999"));
}

#[test]
fn amounts_beyond_decimal_range_saturate() {
    let ledger: Ledger = serde_json::from_str(
        r#"{"general": [
            {"id": 1, "description": "Huge", "amount": 1e29, "category": "other", "date": "2024-01-01"},
            {"id": 2, "description": "Refund", "amount": -1e29, "category": "other", "date": "2024-01-02"},
            {"id": 3, "description": "Typed", "amount": "12.345", "category": "other", "date": "2024-01-03"}
        ]}"#,
    )
    .unwrap();
    assert_eq!(ledger.general[0].amount, Decimal::MAX);
    assert_eq!(ledger.general[1].amount, Decimal::MIN);
    assert_eq!(ledger.general[2].amount, dec("12.345"));
}

#[test]
fn malformed_series_metadata_keeps_installment_flag() {
    let ledger: Ledger = serde_json::from_str(
        r#"{"loans": [
            {"id": 7, "description": "Bank", "amount": 50, "type": "borrowed", "interest": 0,
             "dueDate": "2024-07-10", "isInstallment": true, "installmentNumber": "one",
             "totalInstallments": 2, "installmentDate": "2024-07-10", "parentId": 6,
             "originalAmount": 100}
        ]}"#,
    )
    .unwrap();
    let rec = &ledger.loans[0];
    assert!(rec.is_installment);
    assert!(rec.installment().is_none());
    assert!(rec.lost_installment());

    let mut store = Store::open_in_memory().unwrap();
    store.replace_all(&ledger).unwrap();
    assert!(store.records::<Loan>().unwrap()[0].lost_installment());
}
