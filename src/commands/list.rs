// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, Write};

use anyhow::{Result, anyhow};

use crate::models::{Expense, ExpenseFilter, ListOptions, SortKey};
use crate::service::ExpenseService;
use crate::storage::ExpenseStore;
use crate::utils::{
    align_right, fmt_money, maybe_write_json, opt_arg, parse_date, parse_decimal, parse_month,
    pretty_table,
};

pub const EMPTY: &str = "No expenses found.";
pub const CSV_HEADER: [&str; 6] = ["ID", "Date", "Category", "Amount", "Currency", "Note"];

pub fn handle<S: ExpenseStore>(svc: &ExpenseService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query(svc, sub)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if maybe_write_json(&mut out, json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    match sub.get_one::<String>("format").map(String::as_str) {
        Some("csv") => write_csv(&mut out, &data)?,
        _ => write_table(&mut out, &data)?,
    }
    Ok(())
}

pub fn query<S: ExpenseStore>(
    svc: &ExpenseService<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<Expense>> {
    let opts = options_from(sub)?;
    Ok(svc.list_expenses(&opts)?)
}

/// Filter flags shared by `list` and `summary`.
pub fn filter_from(sub: &clap::ArgMatches) -> Result<ExpenseFilter> {
    let has = |id: &str| sub.try_contains_id(id).unwrap_or(false);
    let decimal = |id: &str| -> Result<_> {
        if !has(id) {
            return Ok(None);
        }
        opt_arg(sub, id).map(|s| parse_decimal(&s)).transpose()
    };
    Ok(ExpenseFilter {
        month: opt_arg(sub, "month").map(|m| parse_month(&m)).transpose()?,
        from_date: opt_arg(sub, "from").map(|d| parse_date(&d)).transpose()?,
        to_date: opt_arg(sub, "to").map(|d| parse_date(&d)).transpose()?,
        category: opt_arg(sub, "category"),
        min_amount: decimal("min")?,
        max_amount: decimal("max")?,
    })
}

pub fn options_from(sub: &clap::ArgMatches) -> Result<ListOptions> {
    let sort_by = match sub.get_one::<String>("sort") {
        Some(s) => s.parse::<SortKey>().map_err(|e| anyhow!(e))?,
        None => SortKey::Date,
    };
    Ok(ListOptions {
        filter: filter_from(sub)?,
        sort_by,
        descending: sub.get_flag("desc"),
        limit: sub.get_one::<usize>("limit").copied(),
    })
}

pub fn write_table<W: Write>(out: &mut W, expenses: &[Expense]) -> Result<()> {
    if expenses.is_empty() {
        writeln!(out, "{}", EMPTY)?;
        return Ok(());
    }
    let rows: Vec<Vec<String>> = expenses
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.date.clone(),
                e.category.clone(),
                fmt_money(&e.amount, &e.currency),
                e.note.clone(),
            ]
        })
        .collect();
    let mut table = pretty_table(&["ID", "Date", "Category", "Amount", "Note"], rows);
    align_right(&mut table, &[3]);
    writeln!(out, "{}", table)?;
    Ok(())
}

/// Text fields are always quoted, embedded quotes doubled. The header is
/// written bare.
pub fn write_csv<W: Write>(out: &mut W, expenses: &[Expense]) -> Result<()> {
    if expenses.is_empty() {
        writeln!(out, "{}", EMPTY)?;
        return Ok(());
    }
    writeln!(out, "{}", CSV_HEADER.join(","))?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(out);
    for e in expenses {
        wtr.write_record([
            e.id.clone(),
            e.date.clone(),
            e.category.clone(),
            format!("{:.2}", e.amount),
            e.currency.clone(),
            e.note.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
