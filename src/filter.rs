// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month and free-text filtering of the cached transaction list.

use crate::models::Transaction;
use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// The month/year/query the dashboard is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub month: u32,
    pub year: i32,
    pub query: String,
}

impl Selection {
    pub fn new(month: u32, year: i32, query: impl Into<String>) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month {}, expected 1-12", month));
        }
        Ok(Self {
            month,
            year,
            query: query.into(),
        })
    }

    /// Current calendar month with an empty query.
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            month: today.month(),
            year: today.year(),
            query: String::new(),
        }
    }

    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        filter_transactions(transactions, self.month, self.year, &self.query)
    }
}

/// Keep transactions dated in `month`/`year` whose category or amount
/// matches `query`. Input order is preserved.
pub fn filter_transactions(
    transactions: &[Transaction],
    month: u32,
    year: i32,
    query: &str,
) -> Vec<Transaction> {
    let needle = query.to_lowercase();
    transactions
        .iter()
        .filter(|t| in_period(t, month, year))
        .filter(|t| matches_query(t, &needle))
        .cloned()
        .collect()
}

pub fn in_period(t: &Transaction, month: u32, year: i32) -> bool {
    match t.date {
        Some(d) => d.year() == year && d.month() == month,
        None => false,
    }
}

/// `needle` must already be lowercased. Whitespace is significant.
pub fn matches_query(t: &Transaction, needle: &str) -> bool {
    needle.is_empty()
        || t.category.to_lowercase().contains(needle)
        || t.amount.to_string().contains(needle)
}
