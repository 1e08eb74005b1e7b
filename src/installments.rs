// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::add_months;
use crate::error::{EngineError, Result};
use crate::models::{Category, Installment, Kind, Record};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

/// Per-installment amount and whole-series amount for `count` installments.
///
/// Loans are entered as the monthly installment value, so it is replicated;
/// every other category is entered as a total and divided evenly.
pub fn split_amount(category: Category, amount: Decimal, count: u32) -> (Decimal, Decimal) {
    let n = Decimal::from(count);
    match category {
        Category::Loans => (amount, amount.saturating_mul(n)),
        Category::Fixed | Category::Car | Category::General => (amount / n, amount),
    }
}

/// Longest series `expand` accepts: one hundred years of monthly installments.
pub const MAX_INSTALLMENTS: u32 = 1200;

/// Validates a requested installment count, `1..=MAX_INSTALLMENTS`.
pub fn series_length(count: i64) -> Result<u32> {
    if count < 1 {
        return Err(EngineError::InvalidArgument(format!(
            "installment count must be at least 1, got {}",
            count
        )));
    }
    match u32::try_from(count) {
        Ok(n) if n <= MAX_INSTALLMENTS => Ok(n),
        _ => Err(EngineError::InvalidArgument(format!(
            "installment count {} exceeds the maximum of {}",
            count, MAX_INSTALLMENTS
        ))),
    }
}

/// Expands `base` into `count` monthly installments starting on `start`.
///
/// Installment `i` (zero-based) is dated `start + i months` with the day
/// clamped to the target month, and gets id `first_id + i`. The base record
/// itself is consumed; its id survives only as each installment's `parent_id`.
pub fn expand<K: Kind>(
    base: &Record<K>,
    count: i64,
    start: NaiveDate,
    first_id: i64,
) -> Result<Vec<Record<K>>> {
    let total = series_length(count)?;

    let (per_installment, original_amount) = split_amount(K::CATEGORY, base.amount, total);

    let mut out = Vec::with_capacity(total as usize);
    for i in 0..total {
        let installment_date = add_months(start, i);
        let mut item = base.clone();
        item.id = first_id + i as i64;
        item.amount = per_installment;
        item.details.stamp_date(installment_date);
        item.is_installment = true;
        item.installment = Some(Installment {
            installment_number: i + 1,
            total_installments: total,
            installment_date,
            parent_id: base.id,
            original_amount,
        });
        out.push(item);
    }
    debug!(
        category = %K::CATEGORY,
        parent_id = base.id,
        count = total,
        %start,
        "expanded installment series"
    );
    Ok(out)
}
