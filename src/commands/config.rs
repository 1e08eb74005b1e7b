// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{Store, db_path};
use crate::installments::series_length;
use crate::utils::{get_currency, get_default_installments, pretty_table, set_setting};
use anyhow::{Context, Result, bail};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            println!("{}", get(store, key)?);
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap().trim();
            set(store, key, value)?;
            println!("{} set to {}", key, value);
        }
        _ => show(store)?,
    }
    Ok(())
}

pub fn get(store: &Store, key: &str) -> Result<String> {
    match key {
        "currency" => get_currency(store.conn()),
        "installments" => Ok(get_default_installments(store.conn())?.to_string()),
        _ => bail!("Unknown setting '{}' (use currency|installments)", key),
    }
}

pub fn set(store: &Store, key: &str, value: &str) -> Result<()> {
    match key {
        "currency" => {
            if value.is_empty() {
                bail!("Currency symbol cannot be empty");
            }
        }
        "installments" => {
            let n: i64 = value
                .parse()
                .with_context(|| format!("Invalid installment count '{}'", value))?;
            series_length(n)?;
        }
        _ => bail!("Unknown setting '{}' (use currency|installments)", key),
    }
    set_setting(store.conn(), key, value)
}

fn show(store: &Store) -> Result<()> {
    let rows = vec![
        vec!["database".to_string(), db_path()?.display().to_string()],
        vec!["currency".to_string(), get(store, "currency")?],
        vec!["installments".to_string(), get(store, "installments")?],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
