// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

use crate::config::{
    DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL, ENV_DATA_FILE, ENV_LOG_FILE, ENV_LOG_LEVEL,
};
use crate::models::{DEFAULT_CURRENCY, SortKey};
use crate::storage::DEFAULT_DATA_FILE;

fn period_args() -> [Arg; 4] {
    [
        Arg::new("month").long("month").help("Filter by month (YYYY-MM)"),
        Arg::new("from").long("from").help("From date, inclusive (YYYY-MM-DD)"),
        Arg::new("to").long("to").help("To date, inclusive (YYYY-MM-DD)"),
        Arg::new("category")
            .long("category")
            .help("Filter by category (case-insensitive)"),
    ]
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    ]
}

fn amount_arg(help: &'static str) -> Arg {
    Arg::new("amount")
        .long("amount")
        .allow_hyphen_values(true)
        .help(help)
}

pub fn build_cli() -> Command {
    Command::new("tracker")
        .about("Personal expense tracker CLI")
        .version(clap::crate_version!())
        .arg(
            Arg::new("data_file")
                .long("data-file")
                .global(true)
                .env(ENV_DATA_FILE)
                .default_value(DEFAULT_DATA_FILE)
                .value_parser(value_parser!(PathBuf))
                .help("Path of the JSON data file"),
        )
        .arg(
            Arg::new("log_file")
                .long("log-file")
                .global(true)
                .env(ENV_LOG_FILE)
                .default_value(DEFAULT_LOG_FILE)
                .value_parser(value_parser!(PathBuf))
                .help("Path of the log file"),
        )
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .global(true)
                .env(ENV_LOG_LEVEL)
                .default_value(DEFAULT_LOG_LEVEL)
                .help("Log filter, e.g. info or tracker=debug"),
        )
        .subcommand(
            Command::new("add")
                .about("Add a new expense")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("Date (YYYY-MM-DD or 'today', default: today)"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("Category (e.g. food, transport)"),
                )
                .arg(amount_arg("Amount spent").required(true))
                .arg(Arg::new("note").long("note").help("Optional note"))
                .arg(
                    Arg::new("currency")
                        .long("currency")
                        .default_value(DEFAULT_CURRENCY)
                        .help("Currency code"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List expenses with filters")
                .args(period_args())
                .arg(
                    Arg::new("min")
                        .long("min")
                        .allow_hyphen_values(true)
                        .help("Minimum amount, inclusive"),
                )
                .arg(
                    Arg::new("max")
                        .long("max")
                        .allow_hyphen_values(true)
                        .help("Maximum amount, inclusive"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(SortKey::NAMES)
                        .default_value("date")
                        .help("Sort by field"),
                )
                .arg(
                    Arg::new("desc")
                        .long("desc")
                        .action(ArgAction::SetTrue)
                        .help("Sort in descending order"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .help("Limit number of results"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["table", "csv"])
                        .default_value("table")
                        .help("Output format"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("summary")
                .about("Show expense summary")
                .args(period_args())
                .args(json_args()),
        )
        .subcommand(
            Command::new("delete").about("Delete an expense").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .help("Expense ID to delete"),
            ),
        )
        .subcommand(
            Command::new("edit")
                .about("Edit an expense")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .help("Expense ID to edit"),
                )
                .arg(Arg::new("date").long("date").help("New date (YYYY-MM-DD)"))
                .arg(Arg::new("category").long("category").help("New category"))
                .arg(amount_arg("New amount"))
                .arg(Arg::new("note").long("note").help("New note"))
                .arg(Arg::new("currency").long("currency").help("New currency")),
        )
}
