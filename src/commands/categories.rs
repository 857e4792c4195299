// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::Backend;
use crate::commands::{api_call, require_login};
use crate::forms::validate_category_name;
use crate::session::SessionContext;
use anyhow::Result;

pub fn handle<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    m: &clap::ArgMatches,
) -> Result<()> {
    if let Some(("add", sub)) = m.subcommand() {
        require_login(session)?;
        let name = validate_category_name(sub.get_one::<String>("name").unwrap())?;
        let created = api_call(session, backend.create_category(&name))?;
        println!("Added category '{}'", created.name);
    }
    Ok(())
}
