// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Selection state, the cached transaction list, and the views derived from
//! them.

use crate::aggregate::{Granularity, Series, Totals, aggregate, bucket};
use crate::api::{ApiError, ApiResult, Backend};
use crate::filter::Selection;
use crate::models::{NewTransaction, Transaction};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Refreshing,
    /// Last refresh failed; the previous cache is still being shown.
    Failed { message: String },
}

/// Identifies one fetch. Only the newest ticket may replace the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
}

pub struct Dashboard<B: Backend> {
    backend: B,
    cache: Vec<Transaction>,
    selection: Selection,
    state: ControllerState,
    last_error: Option<ApiError>,
    issued: u64,
    view: DashboardView,
}

impl<B: Backend> Dashboard<B> {
    pub fn new(backend: B, selection: Selection) -> Self {
        let view = DashboardView {
            selection: selection.clone(),
            transactions: Vec::new(),
            totals: Totals::default(),
        };
        Self {
            backend,
            cache: Vec::new(),
            selection,
            state: ControllerState::Idle,
            last_error: None,
            issued: 0,
            view,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Error of the most recent refresh, if it failed.
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn cached(&self) -> &[Transaction] {
        &self.cache
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Series over the currently filtered transactions.
    pub fn series(&self, granularity: Granularity) -> Series {
        bucket(&self.view.transactions, granularity)
    }

    pub fn set_period(&mut self, month: u32, year: i32) -> Result<()> {
        self.selection = Selection::new(month, year, self.selection.query.clone())?;
        self.recompute();
        Ok(())
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.selection.query = query.into();
        self.recompute();
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        self.state = ControllerState::Refreshing;
        RefreshTicket(self.issued)
    }

    /// Apply a fetch result. Returns `false` when the ticket was superseded
    /// and the result was dropped.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: ApiResult<Vec<Transaction>>,
    ) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(ticket = ticket.0, newest = self.issued, "dropping stale fetch");
            return false;
        }
        match result {
            Ok(list) => {
                tracing::info!(count = list.len(), "transactions refreshed");
                self.cache = list;
                self.state = ControllerState::Idle;
                self.last_error = None;
                self.recompute();
            }
            Err(e) => {
                tracing::warn!("refresh failed: {}", e);
                self.state = ControllerState::Failed {
                    message: e.to_string(),
                };
                self.last_error = Some(e);
            }
        }
        true
    }

    /// Fetch the full list from the backend. On failure the cache is kept and
    /// the error is returned as well as recorded in [`ControllerState`].
    pub fn refresh(&mut self) -> ApiResult<()> {
        let ticket = self.begin_refresh();
        match self.backend.list_transactions() {
            Ok(list) => {
                self.complete_refresh(ticket, Ok(list));
                Ok(())
            }
            Err(e) => {
                self.complete_refresh(ticket, Err(e.clone()));
                Err(e)
            }
        }
    }

    /// Create on the backend, then reload. The result reflects the write
    /// only; a failed reload shows up in [`Dashboard::last_error`].
    pub fn create(&mut self, tx: &NewTransaction) -> ApiResult<Transaction> {
        let created = self.backend.create_transaction(tx)?;
        let _ = self.refresh();
        Ok(created)
    }

    /// Same contract as [`Dashboard::create`].
    pub fn update(&mut self, id: i64, tx: &NewTransaction) -> ApiResult<Transaction> {
        let updated = self.backend.update_transaction(id, tx)?;
        let _ = self.refresh();
        Ok(updated)
    }

    /// Delete on the backend, then drop the one cached record with that id.
    pub fn delete(&mut self, id: i64) -> ApiResult<()> {
        self.backend.delete_transaction(id)?;
        if let Some(pos) = self.cache.iter().position(|t| t.id == id) {
            self.cache.remove(pos);
        }
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        let transactions = self.selection.apply(&self.cache);
        let totals = aggregate(&transactions);
        self.view = DashboardView {
            selection: self.selection.clone(),
            transactions,
            totals,
        };
    }
}
