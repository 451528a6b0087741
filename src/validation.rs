// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Input checks for expense fields.
//!
//! The `validate_*` functions classify without failing. The `format_*`
//! wrappers normalise a raw value and fail with
//! [`TrackerError::InvalidInput`] carrying a fixed message.

use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::error::{Result, TrackerError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const MSG_DATE: &str = "date must be in YYYY-MM-DD format";
pub const MSG_AMOUNT_NUMBER: &str = "amount must be a valid number";
pub const MSG_AMOUNT_POSITIVE: &str = "amount must be > 0";
pub const MSG_CATEGORY: &str = "category cannot be empty";

/// True iff `s` is a zero-padded `YYYY-MM-DD` naming a real calendar day.
pub fn validate_date(s: &str) -> bool {
    let shape_ok = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if shape_ok && NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok() {
        return true;
    }
    warn!(date = s, "invalid date format");
    false
}

pub fn validate_amount(amount: Decimal) -> bool {
    if amount <= Decimal::ZERO {
        warn!(%amount, "invalid amount (must be > 0)");
        return false;
    }
    true
}

pub fn validate_category(category: &str) -> bool {
    if category.trim().is_empty() {
        warn!("category cannot be empty");
        return false;
    }
    true
}

/// Empty input or `today` (any case) resolves to the current local date.
pub fn format_date(s: Option<&str>) -> Result<String> {
    let s = s.map(str::trim).unwrap_or_default();
    if s.is_empty() || s.eq_ignore_ascii_case("today") {
        return Ok(today());
    }
    if !validate_date(s) {
        return Err(TrackerError::invalid(MSG_DATE));
    }
    Ok(s.to_string())
}

/// Parses and rounds to 2 dp, midpoints away from zero (`10.005` -> `10.01`).
pub fn format_amount(s: &str) -> Result<Decimal> {
    let amount = parse_number(s).ok_or_else(|| {
        warn!(input = s, "amount is not a number");
        TrackerError::invalid(MSG_AMOUNT_NUMBER)
    })?;
    if !validate_amount(amount) {
        return Err(TrackerError::invalid(MSG_AMOUNT_POSITIVE));
    }
    Ok(round_amount(amount))
}

pub fn format_category(s: &str) -> Result<String> {
    if !validate_category(s) {
        return Err(TrackerError::invalid(MSG_CATEGORY));
    }
    Ok(s.trim().to_lowercase())
}

pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn parse_number(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_shape_is_strict() {
        assert!(validate_date("2024-02-29"));
        assert!(!validate_date("2023-02-29"));
        assert!(!validate_date("2024-1-5"));
        assert!(!validate_date("15-01-2024"));
        assert!(!validate_date("2024/01/15"));
    }

    #[test]
    fn number_parsing_accepts_exponent_and_whitespace() {
        assert_eq!(parse_number(" 12.5 "), Some(Decimal::new(125, 1)));
        assert_eq!(parse_number("1e2"), Some(Decimal::new(100, 0)));
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number(""), None);
    }
}
