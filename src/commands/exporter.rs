// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::Backend;
use crate::commands::loaded_dashboard;
use crate::models::Transaction;
use crate::session::SessionContext;
use crate::utils::{selection_from_args, today};
use anyhow::{Context, Result, bail};
use serde_json::json;
use std::path::Path;

pub fn handle<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub.get_one::<String>("out").unwrap();

    let selection = selection_from_args(sub, today())?;
    let dash = loaded_dashboard(backend, session, selection)?;
    let rows = &dash.view().transactions;
    write_transactions(rows, &fmt, Path::new(out))?;
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

pub fn write_transactions(rows: &[Transaction], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create {}", out.display()))?;
            wtr.write_record([
                "id",
                "date",
                "transaction_type",
                "category",
                "amount",
                "description",
            ])?;
            for t in rows {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.map(|d| d.to_string()).unwrap_or_default(),
                    t.transaction_type.to_string(),
                    t.category.clone(),
                    t.amount.to_currency_string(),
                    t.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date.map(|d| d.to_string()),
                        "transaction_type": t.transaction_type,
                        "category": t.category,
                        "amount": t.amount.to_currency_string(),
                        "description": t.description,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out.display()))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(())
}
