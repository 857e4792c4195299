// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use budgetrack::api::ApiClient;
use budgetrack::config::{self, Settings};
use budgetrack::session::{SessionContext, SessionEvent, SessionStore};
use budgetrack::{cli, commands, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_count("verbose"));

    let settings_path = config::config_path()?;
    let session_path = match matches.get_one::<String>("session-file") {
        Some(p) => PathBuf::from(p),
        None => config::session_path()?,
    };
    let settings = Settings::load(&settings_path)?;
    let api_url =
        settings.resolve_api_url(matches.get_one::<String>("api-url").map(String::as_str));

    let mut session = SessionContext::load_at_startup(SessionStore::new(&session_path))?;
    session.subscribe(|event| {
        if let SessionEvent::LoggedOut = event {
            eprintln!("You have been logged out.");
        }
    });
    let client = ApiClient::new(&api_url, session.token().map(str::to_string))?;
    tracing::debug!(api_url = %client.base_url(), "backend");

    match matches.subcommand() {
        Some(("auth", sub)) => commands::auth::handle(&client, &mut session, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&client, &mut session, sub)?,
        Some(("category", sub)) => commands::categories::handle(&client, &mut session, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&client, &mut session, sub)?,
        Some(("chart", sub)) => commands::charts::handle(&client, &mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&client, &mut session, sub)?,
        Some(("config", sub)) => commands::config::handle(&settings_path, &session_path, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
