// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "BUDGETRACK_LOG";

/// Log to stderr so table and JSON output on stdout stay clean.
/// `BUDGETRACK_LOG` takes precedence over `-v`.
pub fn init(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "budgetrack=debug",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
