// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Store;
use crate::models::{Kind, Ledger, Record};
use crate::utils::today;
use anyhow::{Result, bail};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = match m.get_one::<String>("out") {
        Some(p) => p.trim().to_string(),
        None => format!("expenses-{}.{}", today(), fmt),
    };
    let ledger = store.load()?;
    match fmt.as_str() {
        "json" => write_json(&ledger, Path::new(&out))?,
        "csv" => write_csv(&ledger, csv::Writer::from_path(&out)?)?,
        _ => bail!("Unknown format: {} (use json|csv)", fmt),
    }
    println!("Exported {} records to {}", ledger.len(), out);
    Ok(())
}

/// Money fields that travel as JSON numbers in the exchange document.
const MONEY_FIELDS: [&str; 3] = ["amount", "originalAmount", "interest"];

/// The exchange document, pretty-printed with two-space indentation.
pub fn write_json(ledger: &Ledger, path: &Path) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(&exchange_document(ledger)?)?)?;
    Ok(())
}

/// `ledger` as the exchange document: the stored form with money fields
/// turned from exact decimal strings into plain numbers.
pub fn exchange_document(ledger: &Ledger) -> Result<Value> {
    let mut doc = serde_json::to_value(ledger)?;
    let records = doc
        .as_object_mut()
        .into_iter()
        .flat_map(|collections| collections.values_mut())
        .filter_map(Value::as_array_mut)
        .flatten()
        .filter_map(Value::as_object_mut);
    for record in records {
        for field in MONEY_FIELDS {
            let Some(slot) = record.get_mut(field) else {
                continue;
            };
            let number = slot
                .as_str()
                .and_then(|s| s.parse::<f64>().ok())
                .and_then(serde_json::Number::from_f64);
            if let Some(n) = number {
                *slot = Value::Number(n);
            }
        }
    }
    Ok(doc)
}

/// One flat row per record across all collections.
pub fn write_csv<W: Write>(ledger: &Ledger, mut wtr: csv::Writer<W>) -> Result<()> {
    wtr.write_record([
        "collection",
        "id",
        "date",
        "description",
        "amount",
        "category",
        "installment",
        "total_installments",
        "parent_id",
    ])?;
    write_rows(&mut wtr, &ledger.loans, |l| l.kind.label().to_lowercase())?;
    write_rows(&mut wtr, &ledger.fixed, |f| f.category.clone())?;
    write_rows(&mut wtr, &ledger.car, |c| c.category.clone())?;
    write_rows(&mut wtr, &ledger.general, |g| g.category.clone())?;
    wtr.flush()?;
    Ok(())
}

fn write_rows<K: Kind, W: Write>(
    wtr: &mut csv::Writer<W>,
    records: &[Record<K>],
    category: impl Fn(&K) -> String,
) -> Result<()> {
    for r in records {
        let inst = r.installment();
        wtr.write_record([
            K::CATEGORY.key().to_string(),
            r.id.to_string(),
            r.bucket_date().map(|d| d.to_string()).unwrap_or_default(),
            r.description.clone(),
            r.amount.to_string(),
            category(&r.details),
            inst.map(|i| i.installment_number.to_string())
                .unwrap_or_default(),
            inst.map(|i| i.total_installments.to_string())
                .unwrap_or_default(),
            inst.map(|i| i.parent_id.to_string()).unwrap_or_default(),
        ])?;
    }
    Ok(())
}
