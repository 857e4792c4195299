// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{Granularity, Series, Totals, aggregate, bucket};
use crate::api::Backend;
use crate::commands::loaded_dashboard;
use crate::session::SessionContext;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, selection_from_args, today};
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub view: Granularity,
    pub series: Series,
    pub split: Totals,
}

pub fn handle<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let data = chart_data(backend, session, sub)?;
    if maybe_print_json(sub.get_flag("json"), false, &data)? {
        return Ok(());
    }
    println!("{}", data.view.title());
    if data.series.is_empty() {
        println!("No dated transactions to chart.");
    } else {
        println!("{}", series_table(&data.series));
    }
    println!("Income vs Expense");
    println!("{}", split_table(&data.split));
    Ok(())
}

/// Charts cover every cached transaction unless a period or query narrows
/// them.
pub fn chart_data<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<ChartData> {
    let view: Granularity = sub
        .get_one::<String>("view")
        .map(|s| s.parse())
        .transpose()
        .map_err(|e: String| anyhow!(e))?
        .unwrap_or(Granularity::Daily);
    let narrowed = ["month", "year", "query"]
        .iter()
        .any(|k| sub.value_source(k).is_some());
    let selection = selection_from_args(sub, today())?;
    let dash = loaded_dashboard(backend, session, selection)?;
    let source = if narrowed {
        dash.view().transactions.as_slice()
    } else {
        dash.cached()
    };
    let mut series = bucket(source, view);
    if sub.get_flag("chronological") {
        series = series.into_chronological();
    }
    Ok(ChartData {
        view,
        series,
        split: aggregate(source),
    })
}

fn bar(value: Decimal, max: Decimal) -> String {
    if max.is_zero() {
        return String::new();
    }
    // Divide first: value <= max keeps the ratio in 0..=1.
    let scaled = (value / max * Decimal::from(BAR_WIDTH)).round();
    let n = scaled.to_usize().unwrap_or(0);
    "#".repeat(n)
}

pub fn series_table(series: &Series) -> comfy_table::Table {
    let max = series
        .income
        .iter()
        .chain(series.expense.iter())
        .copied()
        .max()
        .unwrap_or(Decimal::ZERO);
    let rows = series
        .labels
        .iter()
        .zip(series.income.iter().zip(series.expense.iter()))
        .map(|(l, (i, e))| {
            vec![
                l.clone(),
                fmt_money(i),
                bar(*i, max),
                fmt_money(e),
                bar(*e, max),
            ]
        })
        .collect();
    pretty_table(&["Period", "Income", "", "Expense", ""], rows)
}

pub fn split_table(totals: &Totals) -> comfy_table::Table {
    let sum = totals.income.saturating_add(totals.expense);
    let share = |v: Decimal| {
        if sum.is_zero() {
            "-".to_string()
        } else {
            format!("{:.1}%", v / sum * Decimal::from(100))
        }
    };
    pretty_table(
        &["", "Amount", "Share"],
        vec![
            vec![
                "Income".into(),
                fmt_money(&totals.income),
                share(totals.income),
            ],
            vec![
                "Expense".into(),
                fmt_money(&totals.expense),
                share(totals.expense),
            ],
        ],
    )
}
