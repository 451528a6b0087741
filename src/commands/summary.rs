// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, Write};

use anyhow::Result;

use crate::commands::list::filter_from;
use crate::models::Summary;
use crate::service::ExpenseService;
use crate::storage::ExpenseStore;
use crate::utils::{align_right, fmt_money, maybe_write_json, pretty_table};

pub fn handle<S: ExpenseStore>(svc: &ExpenseService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let summary = query(svc, sub)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !maybe_write_json(&mut out, json_flag, jsonl_flag, &summary)? {
        write_summary(&mut out, &summary)?;
    }
    Ok(())
}

pub fn query<S: ExpenseStore>(svc: &ExpenseService<S>, sub: &clap::ArgMatches) -> Result<Summary> {
    let filter = filter_from(sub)?;
    Ok(svc.summary(&filter)?)
}

/// Categories are shown largest total first.
pub fn write_summary<W: Write>(out: &mut W, s: &Summary) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Summary {}", s.period)?;
    writeln!(out, "Total expenses: {}", s.count)?;
    writeln!(out, "Grand total: {}", fmt_money(&s.grand_total, &s.currency))?;

    if s.totals_by_category.is_empty() {
        return Ok(());
    }
    let mut totals: Vec<_> = s.totals_by_category.iter().collect();
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    let rows = totals
        .into_iter()
        .map(|t| vec![t.category.clone(), fmt_money(&t.total, &s.currency)])
        .collect();
    let mut table = pretty_table(&["Category", "Total"], rows);
    align_right(&mut table, &[1]);
    writeln!(out)?;
    writeln!(out, "By category:")?;
    writeln!(out, "{}", table)?;
    Ok(())
}
