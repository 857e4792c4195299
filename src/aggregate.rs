// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Income/expense totals and time-bucketed series for the charts.

use crate::models::{Transaction, TransactionType};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub remaining: Decimal,
}

/// Sum income and expense amounts. `remaining` is not clamped at zero.
///
/// Sums saturate at [`Decimal::MAX`] instead of overflowing.
pub fn aggregate(transactions: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in transactions {
        let slot = match t.transaction_type {
            TransactionType::Income => &mut income,
            TransactionType::Expense => &mut expense,
        };
        *slot = slot.saturating_add(t.amount.amount());
    }
    Totals {
        income,
        expense,
        remaining: income.saturating_sub(expense),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Bucket label for `date`. Weeks start on Monday.
    pub fn key(&self, date: NaiveDate) -> String {
        match self {
            Granularity::Daily => date.format("%Y-%m-%d").to_string(),
            Granularity::Weekly => week_start(date).format("%Y-%m-%d").to_string(),
            Granularity::Monthly => date.format("%Y-%m").to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Granularity::Daily => "Daily Flow",
            Granularity::Weekly => "Weekly Flow",
            Granularity::Monthly => "Monthly Trend",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Granularity::Daily),
            "weekly" => Ok(Granularity::Weekly),
            "monthly" => Ok(Granularity::Monthly),
            other => Err(format!(
                "Invalid view '{}', expected daily|weekly|monthly",
                other
            )),
        }
    }
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Parallel label/income/expense columns for one chart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub income: Vec<Decimal>,
    pub expense: Vec<Decimal>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Reorder buckets by label. Every label format sorts chronologically as
    /// plain text.
    pub fn into_chronological(self) -> Series {
        let mut rows: Vec<(String, Decimal, Decimal)> = self
            .labels
            .into_iter()
            .zip(self.income)
            .zip(self.expense)
            .map(|((l, i), e)| (l, i, e))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        let mut out = Series::default();
        for (l, i, e) in rows {
            out.labels.push(l);
            out.income.push(i);
            out.expense.push(e);
        }
        out
    }
}

/// Group amounts by time bucket. Labels come out in first-seen order and
/// empty buckets are never filled in. Undated transactions are skipped.
pub fn bucket(transactions: &[Transaction], granularity: Granularity) -> Series {
    let mut series = Series::default();
    let mut index: HashMap<String, usize> = HashMap::new();
    for t in transactions {
        let Some(date) = t.date else {
            continue;
        };
        let key = granularity.key(date);
        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                let i = series.labels.len();
                index.insert(key.clone(), i);
                series.labels.push(key);
                series.income.push(Decimal::ZERO);
                series.expense.push(Decimal::ZERO);
                i
            }
        };
        let column = match t.transaction_type {
            TransactionType::Income => &mut series.income,
            TransactionType::Expense => &mut series.expense,
        };
        column[slot] = column[slot].saturating_add(t.amount.amount());
    }
    series
}
