// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::service::ExpenseService;
use crate::storage::ExpenseStore;
use crate::utils::opt_arg;

pub fn handle<S: ExpenseStore>(svc: &ExpenseService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = opt_arg(sub, "id").unwrap_or_default();
    if !svc.delete_expense(&id)? {
        bail!("Expense not found: {}", id);
    }
    println!("Deleted: {}", id);
    Ok(())
}
