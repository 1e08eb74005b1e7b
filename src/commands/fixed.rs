// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::sum_amounts;
use crate::commands::records::{self, common_fields, installment_cell};
use crate::db::Store;
use crate::models::{Fixed, category_label};
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_date, pretty_table, today};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("monthly", sub)) => records::monthly::<Fixed>(store, sub)?,
        Some(("rm", sub)) => records::remove::<Fixed>(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (description, amount) = common_fields(sub)?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let due_day = *sub.get_one::<u32>("due-day").unwrap();
    let start = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let details = Fixed {
        category,
        due_day: Some(due_day),
    };
    records::save_entry(store, sub, description, amount, details, start)?;
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = records::filtered::<Fixed>(store, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    let mut rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.description.clone(),
                fmt_money(&r.amount, &ccy),
                category_label(&r.details.category).to_string(),
                r.details
                    .due_day
                    .map(|d| format!("day {}", d))
                    .unwrap_or_default(),
                installment_cell(r),
            ]
        })
        .collect();
    if !rows.is_empty() {
        rows.push(vec![
            String::new(),
            "Monthly total".to_string(),
            fmt_money(&sum_amounts(&data), &ccy),
            String::new(),
            String::new(),
            String::new(),
        ]);
    }
    println!(
        "{}",
        pretty_table(
            &["Id", "Description", "Amount", "Category", "Due", "Installment"],
            rows,
        )
    );
    Ok(())
}
