// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{
    CategoryTotal, DEFAULT_CURRENCY, Expense, ExpenseEdit, ExpenseFilter, ExpensePatch,
    ID_PREFIX, ListOptions, NewExpense, SortKey, Summary,
};
use crate::storage::ExpenseStore;
use crate::validation::{format_amount, format_category, format_date, now_timestamp};

/// Business rules on top of an [`ExpenseStore`].
pub struct ExpenseService<S> {
    store: S,
}

impl<S: ExpenseStore> ExpenseService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Next id for `date` (`YYYY-MM-DD`): `EXP-YYYYMMDD-NNNN`, one past the
    /// highest sequence already used on that day. Ids whose last segment is
    /// not a number are ignored.
    pub fn generate_id(&self, date: &str) -> Result<String> {
        let prefix = format!("{}-{}", ID_PREFIX, date.replace('-', ""));
        let max_seq = self
            .store
            .load_all()?
            .iter()
            .filter(|e| e.id.starts_with(&prefix))
            .filter_map(|e| e.id.rsplit('-').next()?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Ok(format!("{}-{:04}", prefix, max_seq.saturating_add(1)))
    }

    pub fn add_expense(&self, input: NewExpense) -> Result<Expense> {
        info!(category = %input.category, amount = %input.amount, "adding expense");

        let date = format_date(input.date.as_deref())?;
        let amount = format_amount(&input.amount)?;
        let category = format_category(&input.category)?;
        let currency = match input.currency.trim() {
            "" => DEFAULT_CURRENCY.to_string(),
            c => c.to_string(),
        };

        let expense = Expense {
            id: self.generate_id(&date)?,
            date,
            category,
            amount,
            currency,
            note: input.note.as_deref().unwrap_or_default().trim().to_string(),
            created_at: now_timestamp(),
        };
        self.store.add(expense.clone())?;
        info!(id = %expense.id, "expense recorded");
        Ok(expense)
    }

    pub fn list_expenses(&self, opts: &ListOptions) -> Result<Vec<Expense>> {
        info!(
            month = ?opts.filter.month,
            category = ?opts.filter.category,
            sort = %opts.sort_by,
            "listing expenses"
        );
        let mut expenses: Vec<Expense> = self
            .store
            .load_all()?
            .into_iter()
            .filter(|e| opts.filter.matches(e))
            .collect();

        sort_expenses(&mut expenses, opts.sort_by, opts.descending);

        if let Some(limit) = opts.limit.filter(|l| *l > 0) {
            expenses.truncate(limit);
        }
        info!(count = expenses.len(), "returning expenses");
        Ok(expenses)
    }

    pub fn summary(&self, filter: &ExpenseFilter) -> Result<Summary> {
        info!(month = ?filter.month, category = ?filter.category, "building summary");
        let expenses = self.list_expenses(&ListOptions::from(filter.clone()))?;
        let period = filter.period();

        let Some(first) = expenses.first() else {
            return Ok(Summary::empty(period));
        };

        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut grand_total = Decimal::ZERO;
        for e in &expenses {
            grand_total += e.amount;
            match totals.iter_mut().find(|t| t.category == e.category) {
                Some(t) => t.total += e.amount,
                None => totals.push(CategoryTotal {
                    category: e.category.clone(),
                    total: e.amount,
                }),
            }
        }

        Ok(Summary {
            count: expenses.len(),
            grand_total,
            totals_by_category: totals,
            currency: first.currency.clone(),
            period,
        })
    }

    pub fn delete_expense(&self, id: &str) -> Result<bool> {
        info!(%id, "deleting expense");
        let removed = self.store.delete(id)?;
        if !removed {
            warn!(%id, "expense not found");
        }
        Ok(removed)
    }

    /// Re-validates only the supplied fields. Callers decide whether an
    /// edit with no fields is allowed.
    pub fn edit_expense(&self, id: &str, edit: &ExpenseEdit) -> Result<Option<Expense>> {
        info!(%id, "editing expense");
        let patch = ExpensePatch {
            date: edit.date.as_deref().map(|d| format_date(Some(d))).transpose()?,
            category: edit.category.as_deref().map(format_category).transpose()?,
            amount: edit.amount.as_deref().map(format_amount).transpose()?,
            note: edit.note.as_deref().map(|n| n.trim().to_string()),
            currency: edit.currency.as_deref().map(|c| c.trim().to_string()),
        };
        let updated = self.store.update(id, &patch)?;
        if updated.is_none() {
            warn!(%id, "expense not found");
        }
        Ok(updated)
    }
}

/// Stable; descending keeps ties in collection order.
fn sort_expenses(expenses: &mut [Expense], key: SortKey, descending: bool) {
    expenses.sort_by(|a, b| {
        let ord = match key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Amount => a.amount.cmp(&b.amount),
            SortKey::Category => a.category.cmp(&b.category),
        };
        if descending { ord.reverse() } else { ord }
    });
}
