// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn base_add(name: &'static str) -> Command {
    Command::new("add")
        .about(format!("Add a {} entry", name))
        .arg(
            Arg::new("description")
                .long("description")
                .short('d')
                .required(true),
        )
        .arg(Arg::new("amount").long("amount").short('a').required(true))
        .arg(
            Arg::new("installments")
                .long("installments")
                .num_args(0..=1)
                .default_missing_value("0")
                .help("Spread over N monthly installments (default from config)"),
        )
}

fn record_group(name: &'static str, about: &'static str, add: Command) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(add)
        .subcommand(
            json_flags(Command::new("list").about("List entries"))
                .arg(Arg::new("month").long("month").help("Only YYYY-MM")),
        )
        .subcommand(json_flags(
            Command::new("monthly").about("Totals per month"),
        ))
        .subcommand(
            Command::new("rm").about("Remove an entry by id").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
}

pub fn build_cli() -> Command {
    let loan_add = base_add("loan")
        .arg(
            Arg::new("type")
                .long("type")
                .required(true)
                .value_parser(["lent", "borrowed"]),
        )
        .arg(
            Arg::new("interest")
                .long("interest")
                .default_value("0")
                .help("Interest in percent"),
        )
        .arg(Arg::new("due-date").long("due-date").help("YYYY-MM-DD"))
        .arg(
            Arg::new("status")
                .long("status")
                .default_value("pending")
                .value_parser(["pending", "paid", "overdue"]),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .help("First installment date YYYY-MM-DD (default today)"),
        );

    let fixed_add = base_add("fixed expense")
        .arg(Arg::new("category").long("category").required(true))
        .arg(
            Arg::new("due-day")
                .long("due-day")
                .required(true)
                .value_parser(value_parser!(u32).range(1..=31)),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .help("First installment date YYYY-MM-DD (default today)"),
        );

    let car_add = base_add("car expense")
        .arg(Arg::new("category").long("category").required(true))
        .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default today)"))
        .arg(Arg::new("mileage").long("mileage"))
        .arg(
            Arg::new("start-month")
                .long("start-month")
                .help("First installment month YYYY-MM (default the entry date)"),
        );

    let general_add = base_add("general expense")
        .arg(Arg::new("category").long("category").required(true))
        .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default today)"))
        .arg(
            Arg::new("start-month")
                .long("start-month")
                .help("First installment month YYYY-MM (default the entry date)"),
        );

    Command::new("tallybook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track loans, fixed bills, car costs and everyday spending")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(record_group("loan", "Money lent or borrowed", loan_add))
        .subcommand(record_group("fixed", "Fixed monthly expenses", fixed_add))
        .subcommand(record_group("car", "Car expenses", car_add))
        .subcommand(
            record_group("general", "General expenses", general_add)
                .subcommand(Command::new("months").about("Months with general expenses")),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Totals across all categories"),
        ))
        .subcommand(
            Command::new("export")
                .about("Write all data to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .help("json|csv"),
                )
                .arg(Arg::new("out").long("out").help("Output path")),
        )
        .subcommand(
            Command::new("import")
                .about("Replace all data with the contents of a JSON export")
                .arg(Arg::new("path").long("path").required(true)),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for problems"))
}
