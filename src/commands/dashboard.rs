// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::Totals;
use crate::api::Backend;
use crate::commands::loaded_dashboard;
use crate::commands::transactions::transactions_table;
use crate::session::SessionContext;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, selection_from_args, today};
use anyhow::Result;

pub fn handle<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let selection = selection_from_args(sub, today())?;
    let dash = loaded_dashboard(backend, session, selection)?;
    let view = dash.view();
    if maybe_print_json(sub.get_flag("json"), false, view)? {
        return Ok(());
    }

    println!(
        "{:04}-{:02}{}",
        view.selection.year,
        view.selection.month,
        if view.selection.query.is_empty() {
            String::new()
        } else {
            format!("  (search: \"{}\")", view.selection.query)
        }
    );
    println!("{}", cards(&view.totals));
    if view.transactions.is_empty() {
        println!("No transactions for this month.");
    } else {
        println!("{}", transactions_table(&view.transactions));
    }
    Ok(())
}

pub fn cards(totals: &Totals) -> comfy_table::Table {
    pretty_table(
        &["Income", "Expense", "Remaining"],
        vec![vec![
            fmt_money(&totals.income),
            fmt_money(&totals.expense),
            fmt_money(&totals.remaining),
        ]],
    )
}
