// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{Dashboard, Standing, net_position};
use crate::db::Store;
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn compute(store: &Store) -> Result<Dashboard> {
    let ledger = store.load()?;
    Ok(net_position(
        &ledger.loans,
        &ledger.fixed,
        &ledger.car,
        &ledger.general,
    ))
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let d = compute(store)?;
    if maybe_print_json(json_flag, jsonl_flag, &d)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    let standing = match d.loans_standing() {
        Standing::Favorable => "owed to you",
        Standing::Unfavorable => "you owe",
    };
    let rows = vec![
        vec!["Total expenses".to_string(), fmt_money(&d.total_expenses, &ccy)],
        vec!["Fixed monthly".to_string(), fmt_money(&d.fixed_monthly, &ccy)],
        vec!["Car".to_string(), fmt_money(&d.car_total, &ccy)],
        vec![
            format!("Loans ({})", standing),
            fmt_money(&d.loans_magnitude(), &ccy),
        ],
        vec![
            "General (not in total)".to_string(),
            fmt_money(&d.general_total, &ccy),
        ],
    ];
    println!("{}", pretty_table(&["", "Amount"], rows));
    Ok(())
}
