// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{group_by_month, months_present};
use crate::commands::car::series_start;
use crate::commands::records::{self, common_fields, date_cell, installment_cell};
use crate::db::Store;
use crate::models::{General, category_label};
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_date, pretty_table, today};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("monthly", sub)) => records::monthly::<General>(store, sub)?,
        Some(("rm", sub)) => records::remove::<General>(store, sub)?,
        Some(("months", _)) => months(store)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (description, amount) = common_fields(sub)?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let start = series_start(sub, date)?;
    let details = General {
        category,
        date: Some(date),
    };
    records::save_entry(store, sub, description, amount, details, start)?;
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = records::filtered::<General>(store, sub)?;
    let groups = group_by_month(&data);
    if json_flag || jsonl_flag {
        let flat: Vec<_> = groups.into_iter().flat_map(|g| g.records).collect();
        maybe_print_json(json_flag, jsonl_flag, &flat)?;
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    for g in groups {
        println!("{} - Total: {}", g.month.label(), fmt_money(&g.total, &ccy));
        let rows: Vec<Vec<String>> = g
            .records
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    date_cell(r.details.date),
                    r.description.clone(),
                    fmt_money(&r.amount, &ccy),
                    category_label(&r.details.category).to_string(),
                    installment_cell(r),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Amount", "Category", "Installment"],
                rows,
            )
        );
    }
    Ok(())
}

fn months(store: &Store) -> Result<()> {
    let rows: Vec<Vec<String>> = months_present(&store.records::<General>()?)
        .into_iter()
        .map(|m| vec![m.to_string(), m.label()])
        .collect();
    println!("{}", pretty_table(&["Month", ""], rows));
    Ok(())
}
