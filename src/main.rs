// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tallybook::{cli, commands, db};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tallybook=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("loan", sub)) => commands::loans::handle(&mut store, sub)?,
        Some(("fixed", sub)) => commands::fixed::handle(&mut store, sub)?,
        Some(("car", sub)) => commands::car::handle(&mut store, sub)?,
        Some(("general", sub)) => commands::general::handle(&mut store, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut store, sub)?,
        Some(("config", sub)) => commands::config::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
