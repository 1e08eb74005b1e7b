// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Store;
use crate::models::{Category, Ledger};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let ledger = read_ledger(Path::new(path))?;
    store.replace_all(&ledger)?;
    let counts: Vec<String> = Category::ALL
        .iter()
        .map(|c| format!("{} {}", ledger.count(*c), c))
        .collect();
    println!("Imported {} from {}", counts.join(", "), path);
    Ok(())
}

/// Reads an exchange document. Missing collections load as empty.
pub fn read_ledger(path: &Path) -> Result<Ledger> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Open import file {}", path.display()))?;
    let ledger: Ledger = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid data file {}", path.display()))?;
    info!(path = %path.display(), records = ledger.len(), "read import file");
    Ok(ledger)
}
