// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub const DEFAULT_CURRENCY: &str = "BDT";
pub const DOCUMENT_VERSION: u32 = 1;
pub const ID_PREFIX: &str = "EXP";

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// One recorded spending event.
///
/// `id` and `created_at` are fixed when the expense is created; every other
/// field can be replaced through an [`ExpensePatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub date: String, // YYYY-MM-DD
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub created_at: String, // YYYY-MM-DD HH:MM:SS
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {:.2} {} | {}",
            self.id, self.date, self.category, self.amount, self.currency, self.note
        )
    }
}

/// On-disk layout of the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl ExpenseDocument {
    pub fn new(expenses: Vec<Expense>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            expenses,
        }
    }
}

impl Default for ExpenseDocument {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Already-validated replacement values for an existing expense.
/// `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub note: Option<String>,
    pub currency: Option<String>,
}

impl ExpensePatch {
    pub fn apply(&self, expense: &mut Expense) {
        if let Some(date) = &self.date {
            expense.date = date.clone();
        }
        if let Some(category) = &self.category {
            expense.category = category.clone();
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(note) = &self.note {
            expense.note = note.clone();
        }
        if let Some(currency) = &self.currency {
            expense.currency = currency.clone();
        }
    }
}

/// Raw user input for a new expense, validated by the service.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: Option<String>,
    pub category: String,
    pub amount: String,
    pub note: Option<String>,
    pub currency: String,
}

impl NewExpense {
    pub fn new(category: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            date: None,
            category: category.into(),
            amount: amount.into(),
            note: None,
            currency: default_currency(),
        }
    }

    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// Raw user input for an edit; only supplied fields are re-validated.
#[derive(Debug, Clone, Default)]
pub struct ExpenseEdit {
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
    pub note: Option<String>,
    pub currency: Option<String>,
}

impl ExpenseEdit {
    /// True when at least one field carries a non-blank value.
    pub fn has_changes(&self) -> bool {
        [
            &self.date,
            &self.category,
            &self.amount,
            &self.note,
            &self.currency,
        ]
        .iter()
        .any(|f| f.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub month: Option<String>, // YYYY-MM
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub category: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl ExpenseFilter {
    pub fn matches(&self, e: &Expense) -> bool {
        if let Some(month) = self.month.as_deref().filter(|m| !m.is_empty()) {
            if !e.date.starts_with(month) {
                return false;
            }
        }
        if let Some(from) = self.from_date.as_deref().filter(|d| !d.is_empty()) {
            if e.date.as_str() < from {
                return false;
            }
        }
        if let Some(to) = self.to_date.as_deref().filter(|d| !d.is_empty()) {
            if e.date.as_str() > to {
                return false;
            }
        }
        if let Some(cat) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if e.category.to_lowercase() != cat.to_lowercase() {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if e.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if e.amount > max {
                return false;
            }
        }
        true
    }

    /// Human-readable description of the date window, e.g. `(2024-01)`.
    pub fn period(&self) -> String {
        let month = self.month.as_deref().filter(|s| !s.is_empty());
        let from = self.from_date.as_deref().filter(|s| !s.is_empty());
        let to = self.to_date.as_deref().filter(|s| !s.is_empty());
        match (month, from, to) {
            (Some(m), _, _) => format!("({})", m),
            (None, Some(f), Some(t)) => format!("({} to {})", f, t),
            (None, Some(f), None) => format!("(from {})", f),
            (None, None, Some(t)) => format!("(to {})", t),
            (None, None, None) => "(all time)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
    Category,
}

impl SortKey {
    pub const NAMES: [&'static str; 3] = ["date", "amount", "category"];
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "amount" => Ok(SortKey::Amount),
            "category" => Ok(SortKey::Category),
            other => Err(format!(
                "unknown sort field '{}' (use date|amount|category)",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::Date => "date",
            SortKey::Amount => "amount",
            SortKey::Category => "category",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub filter: ExpenseFilter,
    pub sort_by: SortKey,
    pub descending: bool,
    pub limit: Option<usize>,
}

impl From<ExpenseFilter> for ListOptions {
    fn from(filter: ExpenseFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Aggregate over a filtered set of expenses.
///
/// `totals_by_category` keeps first-seen order. Amounts in different
/// currencies are summed as-is; `currency` is taken from the first match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
    #[serde(serialize_with = "totals_as_map")]
    pub totals_by_category: Vec<CategoryTotal>,
    pub currency: String,
    pub period: String,
}

impl Summary {
    pub fn empty(period: String) -> Self {
        Self {
            count: 0,
            grand_total: Decimal::ZERO,
            totals_by_category: Vec::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            period,
        }
    }

    pub fn total_for(&self, category: &str) -> Option<Decimal> {
        self.totals_by_category
            .iter()
            .find(|t| t.category == category)
            .map(|t| t.total)
    }
}

#[derive(Serialize)]
struct FloatAmount(#[serde(with = "rust_decimal::serde::float")] Decimal);

fn totals_as_map<S: Serializer>(totals: &[CategoryTotal], s: S) -> Result<S::Ok, S::Error> {
    let mut map = s.serialize_map(Some(totals.len()))?;
    for t in totals {
        map.serialize_entry(&t.category, &FloatAmount(t.total))?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(date: &str, category: &str, amount: i64) -> Expense {
        Expense {
            id: "EXP-20240115-0001".into(),
            date: date.into(),
            category: category.into(),
            amount: Decimal::new(amount, 0),
            currency: "BDT".into(),
            note: String::new(),
            created_at: String::new(),
        }
    }

    #[test]
    fn period_prefers_month() {
        let f = ExpenseFilter {
            month: Some("2024-01".into()),
            from_date: Some("2024-01-01".into()),
            ..Default::default()
        };
        assert_eq!(f.period(), "(2024-01)");
        let f = ExpenseFilter {
            from_date: Some("2024-01-01".into()),
            to_date: Some("2024-01-31".into()),
            ..Default::default()
        };
        assert_eq!(f.period(), "(2024-01-01 to 2024-01-31)");
        assert_eq!(ExpenseFilter::default().period(), "(all time)");
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let f = ExpenseFilter {
            from_date: Some("2024-01-15".into()),
            to_date: Some("2024-01-15".into()),
            ..Default::default()
        };
        assert!(f.matches(&expense("2024-01-15", "food", 5)));
        assert!(!f.matches(&expense("2024-01-16", "food", 5)));
    }

    #[test]
    fn sort_key_parses_case_insensitively() {
        assert_eq!("Amount".parse::<SortKey>(), Ok(SortKey::Amount));
        assert!("payee".parse::<SortKey>().is_err());
    }

    #[test]
    fn display_line_shows_two_decimals() {
        let e = expense("2024-01-15", "food", 10);
        assert_eq!(
            e.to_string(),
            "EXP-20240115-0001 | 2024-01-15 | food | 10.00 BDT | "
        );
    }
}
