// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook::aggregate::{
    group_by_month, loans_balance, monthly_totals, months_present, net_position, Standing,
};
use tallybook::installments::expand;
use tallybook::models::{Car, Fixed, General, Loan, LoanKind, LoanStatus, Record};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn spend(id: i64, amount: &str, on: Option<&str>) -> Record<General> {
    Record::new(
        id,
        format!("item {}", id),
        dec(amount),
        General {
            category: "food".into(),
            date: on.map(date),
        },
    )
}

fn loan(id: i64, amount: &str, interest: &str, kind: LoanKind) -> Record<Loan> {
    Record::new(
        id,
        "loan",
        dec(amount),
        Loan {
            kind,
            interest: Some(dec(interest)),
            due_date: Some(date("2024-06-01")),
            status: LoanStatus::Pending,
        },
    )
}

#[test]
fn monthly_totals_sorted_and_summed() {
    let records = vec![
        spend(1, "10.50", Some("2024-03-02")),
        spend(2, "4", Some("2023-12-31")),
        spend(3, "1.25", Some("2024-03-28")),
        spend(4, "7", None),
        spend(5, "3", Some("2024-01-15")),
    ];
    let totals = monthly_totals(&records);
    let keys: Vec<String> = totals.iter().map(|t| t.month.to_string()).collect();
    assert_eq!(keys, vec!["2023-12", "2024-01", "2024-03"]);
    assert_eq!(totals[2].total, dec("11.75"));

    let sum: Decimal = totals.iter().map(|t| t.total).sum();
    assert_eq!(sum, dec("18.75"));
}

#[test]
fn installment_date_wins_over_own_date() {
    let mut r = spend(1, "20", Some("2024-01-05"));
    let items = expand(&r, 2, date("2024-04-01"), 10).unwrap();
    // a stale own date on an installment must not move its bucket
    r = items[1].clone();
    r.details.date = Some(date("2030-01-01"));
    let totals = monthly_totals(&[items[0].clone(), r]);
    let keys: Vec<String> = totals.iter().map(|t| t.month.to_string()).collect();
    assert_eq!(keys, vec!["2024-04", "2024-05"]);
}

#[test]
fn fixed_without_installments_has_no_bucket() {
    let fixed = vec![Record::new(
        1,
        "Rent",
        dec("1500"),
        Fixed {
            category: "rent".into(),
            due_day: Some(10),
        },
    )];
    assert!(monthly_totals(&fixed).is_empty());
}

#[test]
fn monthly_totals_is_repeatable() {
    let records = vec![
        spend(1, "1", Some("2024-02-01")),
        spend(2, "2", Some("2024-01-01")),
    ];
    assert_eq!(monthly_totals(&records), monthly_totals(&records));
    assert!(monthly_totals::<General>(&[]).is_empty());
}

#[test]
fn lent_loan_applies_interest_once() {
    let loans = vec![loan(1, "100", "10", LoanKind::Lent)];
    let d = net_position(&loans, &[], &[], &[]);
    assert_eq!(d.loans_balance, dec("110"));
    assert_eq!(d.total_expenses, dec("110"));
    assert_eq!(d.loans_standing(), Standing::Favorable);
}

#[test]
fn installment_series_counts_once() {
    let base = loan(1, "50", "0", LoanKind::Borrowed);
    let series = expand(&base, 3, date("2024-01-10"), 2).unwrap();
    assert_eq!(loans_balance(&series), dec("-50"));

    let d = net_position(&series, &[], &[], &[]);
    assert_eq!(d.loans_magnitude(), dec("50"));
    assert_eq!(d.total_expenses, dec("50"));
    assert_eq!(d.loans_standing(), Standing::Unfavorable);
}

#[test]
fn installments_ignore_interest_and_separate_series_each_count() {
    let a = expand(&loan(1, "30", "15", LoanKind::Lent), 2, date("2024-01-01"), 10).unwrap();
    let b = expand(&loan(2, "20", "0", LoanKind::Borrowed), 4, date("2024-01-01"), 20).unwrap();
    let mut loans = a;
    loans.extend(b);
    loans.push(loan(3, "200", "5", LoanKind::Borrowed));
    // 30 - 20 - 210
    assert_eq!(loans_balance(&loans), dec("-200"));
}

#[test]
fn dashboard_sums_categories() {
    let fixed = vec![
        Record::new(1, "Rent", dec("1000"), Fixed { category: "rent".into(), due_day: Some(5) }),
        Record::new(2, "Phone", dec("50"), Fixed { category: "phone".into(), due_day: None }),
    ];
    let car = vec![Record::new(
        3,
        "Fuel",
        dec("120.40"),
        Car {
            category: "fuel".into(),
            date: Some(date("2024-02-02")),
            mileage: Some("40210".into()),
        },
    )];
    let general = vec![spend(4, "33", Some("2024-02-03"))];
    let loans = vec![loan(5, "100", "0", LoanKind::Borrowed)];

    let d = net_position(&loans, &fixed, &car, &general);
    assert_eq!(d.fixed_monthly, dec("1050"));
    assert_eq!(d.car_total, dec("120.40"));
    assert_eq!(d.general_total, dec("33"));
    assert_eq!(d.loans_balance, dec("-100"));
    // general spending is reported but stays out of the total
    assert_eq!(d.total_expenses, dec("1270.40"));
}

#[test]
fn empty_dashboard_is_zero() {
    let d = net_position(&[], &[], &[], &[]);
    assert_eq!(d.total_expenses, Decimal::ZERO);
    assert_eq!(d.loans_balance, Decimal::ZERO);
    assert_eq!(d.loans_standing(), Standing::Favorable);
}

#[test]
fn months_listed_newest_first_and_grouped() {
    let records = vec![
        spend(1, "1", Some("2024-01-05")),
        spend(2, "2", Some("2024-03-01")),
        spend(3, "3", Some("2024-01-20")),
        spend(4, "4", None),
    ];
    let months: Vec<String> = months_present(&records)
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(months, vec!["2024-03", "2024-01"]);

    let groups = group_by_month(&records);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].total, dec("4"));
    let ids: Vec<i64> = groups[1].records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

fn car_cost(id: i64, amount: Decimal) -> Record<Car> {
    Record::new(
        id,
        "car",
        amount,
        Car {
            category: "repairs".into(),
            date: Some(date("2024-02-10")),
            mileage: None,
        },
    )
}

#[test]
fn totals_near_the_decimal_limit_saturate() {
    let big = dec("50000000000000000000000000000");
    let car = vec![car_cost(1, big), car_cost(2, big)];
    let dash = net_position(&[], &[], &car, &[]);
    assert_eq!(dash.car_total, Decimal::MAX);
    assert_eq!(dash.total_expenses, Decimal::MAX);

    let totals = monthly_totals(&car);
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].total, Decimal::MAX);

    let lent = Record::new(
        3,
        "loan",
        big,
        Loan {
            kind: LoanKind::Lent,
            interest: Some(dec("80")),
            due_date: Some(date("2024-06-01")),
            status: LoanStatus::Pending,
        },
    );
    let mut borrowed = lent.clone();
    borrowed.id = 4;
    borrowed.amount = Decimal::MAX;
    borrowed.details.kind = LoanKind::Borrowed;
    assert_eq!(loans_balance(std::slice::from_ref(&lent)), Decimal::MAX);
    assert_eq!(
        loans_balance(&[borrowed.clone(), borrowed]),
        Decimal::MIN
    );
}
