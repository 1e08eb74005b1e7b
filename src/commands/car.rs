// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::records::{self, common_fields, date_cell, installment_cell};
use crate::db::Store;
use crate::models::{Car, category_label};
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_date, parse_month, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("monthly", sub)) => records::monthly::<Car>(store, sub)?,
        Some(("rm", sub)) => records::remove::<Car>(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Installments start on the first of `--start-month` when given, otherwise
/// on the entry date itself.
pub fn series_start(sub: &clap::ArgMatches, date: NaiveDate) -> Result<NaiveDate> {
    match sub.get_one::<String>("start-month") {
        Some(m) => Ok(parse_month(m)?.first_day()),
        None => Ok(date),
    }
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (description, amount) = common_fields(sub)?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let mileage = sub
        .get_one::<String>("mileage")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let start = series_start(sub, date)?;
    let details = Car {
        category,
        date: Some(date),
        mileage,
    };
    records::save_entry(store, sub, description, amount, details, start)?;
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut data = records::filtered::<Car>(store, sub)?;
    data.sort_by(|a, b| b.bucket_date().cmp(&a.bucket_date()));
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                date_cell(r.details.date),
                r.description.clone(),
                fmt_money(&r.amount, &ccy),
                category_label(&r.details.category).to_string(),
                r.details.mileage.clone().unwrap_or_default(),
                installment_cell(r),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Date", "Description", "Amount", "Category", "Mileage", "Installment"],
            rows,
        )
    );
    Ok(())
}
