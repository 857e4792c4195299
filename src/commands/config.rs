// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Settings, parse_api_url};
use crate::utils::pretty_table;
use anyhow::Result;
use std::path::Path;

pub fn handle(settings_path: &Path, session_path: &Path, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let settings = Settings::load(settings_path)?;
            let rows = vec![
                vec!["api_url".to_string(), settings.api_url],
                vec![
                    "config_file".to_string(),
                    settings_path.display().to_string(),
                ],
                vec![
                    "session_file".to_string(),
                    session_path.display().to_string(),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-url", sub)) => {
            let url = parse_api_url(sub.get_one::<String>("url").unwrap())?;
            let mut settings = Settings::load(settings_path)?;
            settings.api_url = url.clone();
            settings.save(settings_path)?;
            println!("Backend URL set to {}", url);
        }
        _ => {}
    }
    Ok(())
}
