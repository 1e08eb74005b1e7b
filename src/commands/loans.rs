// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::records::{self, common_fields, date_cell, installment_cell};
use crate::db::Store;
use crate::models::{Loan, LoanKind, LoanStatus};
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("monthly", sub)) => records::monthly::<Loan>(store, sub)?,
        Some(("rm", sub)) => records::remove::<Loan>(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (description, amount) = common_fields(sub)?;
    let kind: LoanKind = sub
        .get_one::<String>("type")
        .unwrap()
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let status: LoanStatus = sub
        .get_one::<String>("status")
        .unwrap()
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let interest = parse_decimal(sub.get_one::<String>("interest").unwrap())?;
    let due_date = sub
        .get_one::<String>("due-date")
        .map(|s| parse_date(s))
        .transpose()?;
    let start = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => today(),
    };

    let details = Loan {
        kind,
        interest: Some(interest),
        due_date,
        status,
    };
    records::save_entry(store, sub, description, amount, details, start)?;
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = records::filtered::<Loan>(store, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            let sign = match r.details.kind {
                LoanKind::Lent => "+",
                LoanKind::Borrowed => "-",
            };
            let interest = r
                .details
                .interest
                .filter(|i| *i > Decimal::ZERO)
                .map(|i| format!("{}%", i.normalize()))
                .unwrap_or_default();
            vec![
                r.id.to_string(),
                r.description.clone(),
                format!("{} {}", sign, fmt_money(&r.amount, &ccy)),
                r.details.kind.label().to_string(),
                r.details.status.label().to_string(),
                interest,
                date_cell(r.details.due_date),
                installment_cell(r),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Description", "Amount", "Type", "Status", "Interest", "Due", "Installment"],
            rows,
        )
    );
    Ok(())
}
