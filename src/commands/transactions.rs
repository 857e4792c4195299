// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::Backend;
use crate::commands::{api_call, loaded_dashboard, report_reload, require_login};
use crate::dashboard::Dashboard;
use crate::filter::Selection;
use crate::forms::TransactionForm;
use crate::models::Transaction;
use crate::session::SessionContext;
use crate::utils::{confirm, maybe_print_json, pretty_table, selection_from_args, today};
use anyhow::Result;
use serde::Serialize;

pub fn handle<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(backend, session, sub)?,
        Some(("update", sub)) => update(backend, session, sub)?,
        Some(("show", sub)) => show(backend, session, sub)?,
        Some(("delete", sub)) => delete(backend, session, sub)?,
        Some(("list", sub)) => list(backend, session, sub)?,
        _ => {}
    }
    Ok(())
}

/// Copy whichever transaction flags were given onto `form`.
pub fn apply_field_args(form: &mut TransactionForm, sub: &clap::ArgMatches) {
    let fields: [(&str, &mut String); 6] = [
        ("amount", &mut form.amount),
        ("type", &mut form.transaction_type),
        ("category", &mut form.category),
        ("new-category", &mut form.new_category),
        ("description", &mut form.description),
        ("date", &mut form.date),
    ];
    for (name, slot) in fields {
        if let Some(v) = sub.get_one::<String>(name) {
            *slot = v.clone();
        }
    }
}

fn add<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<()> {
    require_login(session)?;
    let mut form = TransactionForm::default();
    apply_field_args(&mut form, sub);
    let new_tx = form.validate()?;
    let mut dash = Dashboard::new(backend, Selection::for_date(new_tx.date));
    let res = dash.create(&new_tx);
    let created = api_call(session, res)?;
    report_reload(session, &dash)?;
    println!(
        "Recorded {} {} in '{}' on {} (id {})",
        created.transaction_type,
        created.amount.to_currency_string(),
        created.category,
        new_tx.date,
        created.id
    );
    Ok(())
}

fn update<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<()> {
    require_login(session)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let current = api_call(session, backend.get_transaction(id))?;
    let mut form = TransactionForm::from_transaction(&current);
    apply_field_args(&mut form, sub);
    let new_tx = form.validate_edit(&current)?;
    let mut dash = Dashboard::new(backend, Selection::for_date(new_tx.date));
    let res = dash.update(id, &new_tx);
    let updated = api_call(session, res)?;
    report_reload(session, &dash)?;
    println!(
        "Updated transaction {}: {} {} in '{}'",
        updated.id,
        updated.transaction_type,
        updated.amount.to_currency_string(),
        updated.category
    );
    Ok(())
}

fn show<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<()> {
    require_login(session)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let t = api_call(session, backend.get_transaction(id))?;
    println!("{}", transactions_table(std::slice::from_ref(&t)));
    Ok(())
}

fn delete<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<()> {
    require_login(session)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if !sub.get_flag("yes") && !confirm("Are you sure you want to delete this transaction?")? {
        println!("Cancelled");
        return Ok(());
    }
    let mut dash = Dashboard::new(backend, Selection::for_date(today()));
    let res = dash.delete(id);
    api_call(session, res)?;
    println!("Deleted transaction {}", id);
    Ok(())
}

fn list<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(backend, session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions found.");
        } else {
            let rows = data.iter().map(TransactionRow::cells).collect();
            println!(
                "{}",
                pretty_table(
                    &["ID", "Date", "Amount", "Type", "Category", "Description"],
                    rows
                )
            );
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub amount: String,
    pub transaction_type: String,
    pub category: String,
    pub description: String,
}

impl TransactionRow {
    pub fn from_transaction(t: &Transaction) -> Self {
        Self {
            id: t.id,
            date: t.date.map(|d| d.to_string()).unwrap_or_default(),
            amount: t.amount.to_currency_string(),
            transaction_type: t.transaction_type.to_string(),
            category: t.category.clone(),
            description: t.description.clone().unwrap_or_default(),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.clone(),
            self.amount.clone(),
            self.transaction_type.clone(),
            self.category.clone(),
            if self.description.is_empty() {
                "-".to_string()
            } else {
                self.description.clone()
            },
        ]
    }
}

pub fn transactions_table(list: &[Transaction]) -> comfy_table::Table {
    let rows = list
        .iter()
        .map(|t| TransactionRow::from_transaction(t).cells())
        .collect();
    pretty_table(
        &["ID", "Date", "Amount", "Type", "Category", "Description"],
        rows,
    )
}

/// Fetch, then filter by the `--month/--year/--query` selection.
pub fn query_rows<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let selection: Selection = selection_from_args(sub, today())?;
    let dash = loaded_dashboard(backend, session, selection)?;
    Ok(dash
        .view()
        .transactions
        .iter()
        .map(TransactionRow::from_transaction)
        .collect())
}
