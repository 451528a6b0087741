// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::validation::validate_date;

pub fn parse_date(s: &str) -> Result<String> {
    let s = s.trim();
    if !validate_date(s) {
        anyhow::bail!("Invalid date '{}', expected YYYY-MM-DD", s);
    }
    Ok(s.to_string())
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    if s.len() != 7 {
        anyhow::bail!("Invalid month '{}', expected YYYY-MM", s);
    }
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Trimmed value of an optional string argument; blank counts as absent.
pub fn opt_arg(m: &clap::ArgMatches, id: &str) -> Option<String> {
    m.get_one::<String>(id)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Raw value of an optional string argument, blank values kept.
pub fn raw_arg(m: &clap::ArgMatches, id: &str) -> Option<String> {
    m.get_one::<String>(id).cloned()
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{:.2} {}", d, ccy)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Right-aligns the given columns, for amounts.
pub fn align_right(t: &mut Table, columns: &[usize]) {
    for &i in columns {
        if let Some(col) = t.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn maybe_write_json<W: Write, T: serde::Serialize>(
    out: &mut W,
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        writeln!(out, "{}", serde_json::to_string_pretty(v)?)?;
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                writeln!(out, "{}", serde_json::to_string(item)?)?;
            }
        } else {
            writeln!(out, "{}", serde_json::to_string(&val)?)?;
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_must_be_zero_padded() {
        assert_eq!(parse_month("2024-01").unwrap(), "2024-01");
        assert!(parse_month("2024-1").is_err());
        assert!(parse_month("2024-13").is_err());
    }

    #[test]
    fn jsonl_streams_array_items() {
        let mut buf = Vec::new();
        let wrote = maybe_write_json(&mut buf, false, true, &vec![1, 2]).unwrap();
        assert!(wrote);
        assert_eq!(String::from_utf8(buf).unwrap(), "1\n2\n");
    }
}
