// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::models::{Expense, ExpenseEdit};
use crate::service::ExpenseService;
use crate::storage::ExpenseStore;
use crate::utils::{opt_arg, raw_arg};

pub fn handle<S: ExpenseStore>(svc: &ExpenseService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let updated = edit(svc, sub)?;
    println!("Updated: {}", updated);
    Ok(())
}

pub fn edit<S: ExpenseStore>(svc: &ExpenseService<S>, sub: &clap::ArgMatches) -> Result<Expense> {
    let id = opt_arg(sub, "id").unwrap_or_default();
    let changes = ExpenseEdit {
        date: raw_arg(sub, "date"),
        category: raw_arg(sub, "category"),
        amount: raw_arg(sub, "amount"),
        note: raw_arg(sub, "note"),
        currency: raw_arg(sub, "currency"),
    };
    if !changes.has_changes() {
        bail!("At least one field must be provided to edit");
    }
    match svc.edit_expense(&id, &changes)? {
        Some(e) => Ok(e),
        None => bail!("Expense not found: {}", id),
    }
}
