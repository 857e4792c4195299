// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod categories;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod exporter;
pub mod transactions;

use crate::api::{ApiResult, Backend, check_auth};
use crate::dashboard::Dashboard;
use crate::filter::Selection;
use crate::session::SessionContext;
use anyhow::{Result, bail};

/// Turn a backend result into a command result, logging out on 401.
pub fn api_call<T>(session: &mut SessionContext, result: ApiResult<T>) -> Result<T> {
    Ok(check_auth(result, session)?)
}

pub fn require_login(session: &SessionContext) -> Result<()> {
    if !session.is_authenticated() {
        bail!("Not logged in. Run `budgetrack auth login` first.");
    }
    Ok(())
}

/// Report a reload that failed after a successful write. A rejected token
/// still ends the session.
pub fn report_reload<B: Backend>(
    session: &mut SessionContext,
    dash: &Dashboard<B>,
) -> Result<()> {
    if let Some(e) = dash.last_error() {
        eprintln!("Saved, but reloading transactions failed: {}", e);
        if e.is_unauthorized() {
            session.logout()?;
        }
    }
    Ok(())
}

/// A dashboard with the cache freshly loaded from the backend.
pub fn loaded_dashboard<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    selection: Selection,
) -> Result<Dashboard<B>> {
    require_login(session)?;
    let mut dash = Dashboard::new(backend, selection);
    let res = dash.refresh();
    api_call(session, res)?;
    Ok(dash)
}
