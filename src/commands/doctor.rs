// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Store;
use crate::models::{Category, Kind, Ledger, Record};
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub issue: &'static str,
    pub detail: String,
}

pub fn handle(store: &Store) -> Result<()> {
    let findings = check(&store.load()?);
    if findings.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = findings
            .into_iter()
            .map(|f| vec![f.issue.to_string(), f.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn check(ledger: &Ledger) -> Vec<Finding> {
    let mut out = Vec::new();
    check_collection(&ledger.loans, &mut out);
    check_collection(&ledger.fixed, &mut out);
    check_collection(&ledger.car, &mut out);
    check_collection(&ledger.general, &mut out);

    // Loans without interest count as 0% on the dashboard
    for l in ledger.loans.iter().filter(|l| !l.is_installment()) {
        if l.details.interest.is_none() {
            out.push(Finding {
                issue: "missing_interest",
                detail: format!("loans {} '{}'", l.id, l.description),
            });
        }
    }
    out
}

fn check_collection<K: Kind>(records: &[Record<K>], out: &mut Vec<Finding>) {
    let name = K::CATEGORY.key();

    // 1) Dated categories with nothing to bucket by never show up in monthly totals
    if K::CATEGORY != Category::Fixed {
        for r in records.iter().filter(|r| r.bucket_date().is_none()) {
            out.push(Finding {
                issue: "undated",
                detail: format!("{} {} '{}'", name, r.id, r.description),
            });
        }
    }

    // 2) Ids must be unique within a collection for removal to be exact
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for r in records {
        if !seen.insert(r.id) && reported.insert(r.id) {
            out.push(Finding {
                issue: "duplicate_id",
                detail: format!("{} {}", name, r.id),
            });
        }
    }

    // 3) Installment flag without series metadata counts as a plain record
    for r in records.iter().filter(|r| r.lost_installment()) {
        out.push(Finding {
            issue: "broken_installment",
            detail: format!("{} {} '{}'", name, r.id, r.description),
        });
    }

    // 4) Amounts pinned at the decimal range, saturated on import
    for r in records.iter().filter(|r| r.amount.abs() == Decimal::MAX) {
        out.push(Finding {
            issue: "amount_out_of_range",
            detail: format!("{} {} '{}'", name, r.id, r.description),
        });
    }

    // 5) Series that lost installments, usually through `rm`
    let mut series: BTreeMap<i64, (u32, HashSet<u32>)> = BTreeMap::new();
    for i in records.iter().filter_map(|r| r.installment()) {
        let entry = series
            .entry(i.parent_id)
            .or_insert_with(|| (i.total_installments, HashSet::new()));
        entry.1.insert(i.installment_number);
    }
    for (parent, (total, numbers)) in series {
        if (numbers.len() as u32) < total {
            out.push(Finding {
                issue: "partial_series",
                detail: format!(
                    "{} parent {}: {} of {} installments",
                    name,
                    parent,
                    numbers.len(),
                    total
                ),
            });
        }
    }
}
