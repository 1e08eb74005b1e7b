// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Subcommands shared by the four record groups.

use crate::aggregate::{in_month, monthly_totals};
use crate::db::Store;
use crate::installments::{expand, series_length};
use crate::models::{Kind, Record};
use crate::utils::{
    fmt_money, get_currency, get_default_installments, installment_count, maybe_print_json,
    parse_decimal, parse_month, pretty_table,
};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Description and amount, trimmed and parsed.
pub fn common_fields(sub: &clap::ArgMatches) -> Result<(String, Decimal)> {
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    Ok((description, amount))
}

/// Stores a new entry, expanding it into installments when `--installments`
/// was given. Returns what was stored.
pub fn save_entry<K: Kind>(
    store: &mut Store,
    sub: &clap::ArgMatches,
    description: String,
    amount: Decimal,
    details: K,
    start: NaiveDate,
) -> Result<Vec<Record<K>>> {
    let ccy = get_currency(store.conn())?;
    let Some(raw) = sub.get_one::<String>("installments") else {
        let id = store.reserve_ids(1)?;
        let rec = Record::new(id, description, amount, details);
        store.add_record(&rec)?;
        println!(
            "Added {} '{}' {} (id {})",
            K::CATEGORY,
            rec.description,
            fmt_money(&rec.amount, &ccy),
            rec.id
        );
        return Ok(vec![rec]);
    };

    let count = installment_count(raw, get_default_installments(store.conn())?);
    let total = series_length(count)?;
    // one id for the transient base item, then one per installment
    let first = store.reserve_ids(i64::from(total) + 1)?;
    let base = Record::new(first, description, amount, details);
    let items = expand(&base, count, start, first + 1)?;
    store.add_records(&items)?;
    if let Some(head) = items.first() {
        println!(
            "Added {} installments of {} for '{}' starting {}",
            items.len(),
            fmt_money(&head.amount, &ccy),
            head.description,
            start
        );
    }
    Ok(items)
}

/// Records of `K`, optionally narrowed to `--month`.
pub fn filtered<K: Kind>(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<Record<K>>> {
    let all = store.records::<K>()?;
    match sub.get_one::<String>("month") {
        Some(m) => Ok(in_month(&all, parse_month(m)?)),
        None => Ok(all),
    }
}

pub fn monthly<K: Kind>(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let totals = monthly_totals(&store.records::<K>()?);
    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        let ccy = get_currency(store.conn())?;
        let rows: Vec<Vec<String>> = totals
            .iter()
            .map(|t| vec![t.month.to_string(), t.month.label(), fmt_money(&t.total, &ccy)])
            .collect();
        println!("{}", pretty_table(&["Month", "", "Total"], rows));
    }
    Ok(())
}

pub fn remove<K: Kind>(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = store.remove_record(K::CATEGORY, id)?;
    if n == 0 {
        anyhow::bail!("No {} entry with id {}", K::CATEGORY, id);
    }
    println!("Removed {} entry {}", K::CATEGORY, id);
    Ok(())
}

/// `3/12 (Mar 2025)` for installments, empty otherwise.
pub fn installment_cell<K: Kind>(r: &Record<K>) -> String {
    match r.installment() {
        Some(i) => format!(
            "{}/{} ({})",
            i.installment_number,
            i.total_installments,
            crate::calendar::Month::of(i.installment_date).label()
        ),
        None => String::new(),
    }
}

pub fn date_cell(d: Option<NaiveDate>) -> String {
    d.map(|d| d.to_string()).unwrap_or_default()
}
