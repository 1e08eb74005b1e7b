// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::Month;
use crate::models::{Car, Fixed, General, Kind, Loan, LoanKind, Record};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month: Month,
    pub total: Decimal,
}

/// Sums amounts per bucket month, ascending. Records without a bucket date
/// are left out. Sums saturate at the `Decimal` range instead of overflowing.
pub fn monthly_totals<K: Kind>(records: &[Record<K>]) -> Vec<MonthlyTotal> {
    let mut map: BTreeMap<Month, Decimal> = BTreeMap::new();
    for r in records {
        let Some(month) = r.bucket_month() else {
            continue;
        };
        let total = map.entry(month).or_insert(Decimal::ZERO);
        *total = total.saturating_add(r.amount);
    }
    map.into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

pub fn sum_amounts<K>(records: &[Record<K>]) -> Decimal {
    records
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.amount))
}

/// Distinct bucket months, newest first.
pub fn months_present<K: Kind>(records: &[Record<K>]) -> Vec<Month> {
    let months: std::collections::BTreeSet<Month> =
        records.iter().filter_map(|r| r.bucket_month()).collect();
    months.into_iter().rev().collect()
}

pub fn in_month<K: Kind>(records: &[Record<K>], month: Month) -> Vec<Record<K>> {
    records
        .iter()
        .filter(|r| r.bucket_month() == Some(month))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup<K> {
    pub month: Month,
    pub total: Decimal,
    pub records: Vec<Record<K>>,
}

/// Groups records by bucket month, newest month first; inside a group records
/// are ordered newest date first. Undated records are dropped.
pub fn group_by_month<K: Kind>(records: &[Record<K>]) -> Vec<MonthGroup<K>> {
    let mut map: BTreeMap<Month, Vec<Record<K>>> = BTreeMap::new();
    for r in records {
        if let Some(month) = r.bucket_month() {
            map.entry(month).or_default().push(r.clone());
        }
    }
    map.into_iter()
        .rev()
        .map(|(month, mut records)| {
            records.sort_by(|a, b| b.bucket_date().cmp(&a.bucket_date()));
            MonthGroup {
                month,
                total: sum_amounts(&records),
                records,
            }
        })
        .collect()
}

/// Which side of the loans balance the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    /// Net lent: money is owed to the user.
    Favorable,
    /// Net borrowed: the user owes money.
    Unfavorable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_expenses: Decimal,
    pub fixed_monthly: Decimal,
    pub car_total: Decimal,
    pub loans_balance: Decimal,
    /// Informational only; not part of `total_expenses`.
    pub general_total: Decimal,
}

impl Dashboard {
    pub fn loans_magnitude(&self) -> Decimal {
        self.loans_balance.abs()
    }

    pub fn loans_standing(&self) -> Standing {
        if self.loans_balance >= Decimal::ZERO {
            Standing::Favorable
        } else {
            Standing::Unfavorable
        }
    }
}

/// What one loan record adds to the running balance before its sign is
/// applied. `seen_parents` collapses an installment series to its first
/// installment: the series is one monthly obligation, not `n` of them.
fn loan_contribution(loan: &Record<Loan>, seen_parents: &mut HashSet<i64>) -> Decimal {
    match loan.installment() {
        Some(inst) => {
            if seen_parents.insert(inst.parent_id) {
                loan.amount
            } else {
                Decimal::ZERO
            }
        }
        None => {
            let rate = loan.details.interest.unwrap_or(Decimal::ZERO) / Decimal::ONE_HUNDRED;
            loan.amount.saturating_mul(Decimal::ONE.saturating_add(rate))
        }
    }
}

/// Signed loan position: positive when the user is owed money on net.
pub fn loans_balance(loans: &[Record<Loan>]) -> Decimal {
    let mut seen_parents = HashSet::new();
    loans.iter().fold(Decimal::ZERO, |balance, loan| {
        let amount = loan_contribution(loan, &mut seen_parents);
        match loan.details.kind {
            LoanKind::Lent => balance.saturating_add(amount),
            LoanKind::Borrowed => balance.saturating_sub(amount),
        }
    })
}

pub fn net_position(
    loans: &[Record<Loan>],
    fixed: &[Record<Fixed>],
    car: &[Record<Car>],
    general: &[Record<General>],
) -> Dashboard {
    let car_total = sum_amounts(car);
    let general_total = sum_amounts(general);
    let fixed_monthly = sum_amounts(fixed);
    let loans_balance = loans_balance(loans);
    Dashboard {
        total_expenses: fixed_monthly
            .saturating_add(car_total)
            .saturating_add(loans_balance.abs()),
        fixed_monthly,
        car_total,
        loans_balance,
        general_total,
    }
}
