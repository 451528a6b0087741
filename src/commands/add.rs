// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{DEFAULT_CURRENCY, Expense, NewExpense};
use crate::service::ExpenseService;
use crate::storage::ExpenseStore;
use crate::utils::{opt_arg, raw_arg};

pub fn handle<S: ExpenseStore>(svc: &ExpenseService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let expense = add(svc, sub)?;
    println!("Added: {}", expense);
    Ok(())
}

pub fn add<S: ExpenseStore>(svc: &ExpenseService<S>, sub: &clap::ArgMatches) -> Result<Expense> {
    let input = NewExpense {
        date: opt_arg(sub, "date"),
        category: raw_arg(sub, "category").unwrap_or_default(),
        amount: raw_arg(sub, "amount").unwrap_or_default(),
        note: raw_arg(sub, "note"),
        currency: opt_arg(sub, "currency").unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    };
    Ok(svc.add_expense(input)?)
}
