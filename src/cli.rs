// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn period_args() -> [Arg; 3] {
    [
        Arg::new("month")
            .long("month")
            .help("Month to show (1-12), defaults to the current month")
            .value_parser(value_parser!(u32).range(1..=12)),
        Arg::new("year")
            .long("year")
            .help("Year to show, defaults to the current year")
            .value_parser(value_parser!(i32)),
        Arg::new("query")
            .long("query")
            .short('q')
            .help("Case-insensitive match on category or amount")
            .allow_hyphen_values(true),
    ]
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl"),
        Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue),
    ]
}

fn transaction_field_args(required: bool) -> [Arg; 6] {
    [
        Arg::new("amount").long("amount").required(required),
        Arg::new("type")
            .long("type")
            .help("income or expense")
            .value_parser(["income", "expense"])
            .required(required),
        Arg::new("category").long("category"),
        Arg::new("new-category")
            .long("new-category")
            .help("Use a new category name instead of --category"),
        Arg::new("description").long("description"),
        Arg::new("date")
            .long("date")
            .help("YYYY-MM-DD")
            .required(required),
    ]
}

pub fn build_cli() -> Command {
    Command::new("budgetrack")
        .about("Track income and expenses against a budget backend")
        .version(clap::crate_version!())
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .env("BUDGETRACK_API_URL")
                .global(true)
                .help("Backend base URL, overrides the configured one"),
        )
        .arg(
            Arg::new("session-file")
                .long("session-file")
                .env("BUDGETRACK_SESSION")
                .global(true)
                .hide(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("auth")
                .about("Log in, sign up, log out")
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("signup")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true))
                        .arg(
                            Arg::new("confirm-password")
                                .long("confirm-password")
                                .required(true),
                        ),
                )
                .subcommand(Command::new("logout"))
                .subcommand(Command::new("whoami")),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(Command::new("add").args(transaction_field_args(true)))
                .subcommand(
                    Command::new("update")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .args(transaction_field_args(false)),
                )
                .subcommand(
                    Command::new("show").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("delete")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .short('y')
                                .action(ArgAction::SetTrue)
                                .help("Skip the confirmation prompt"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .args(period_args())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(Command::new("add").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Income, expense and remaining for a month, plus its transactions")
                .args(period_args())
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("chart")
                .about("Income and expense per day, week or month")
                .long_about(
                    "Income and expense per day, week or month. Covers every transaction \
                     unless --month, --year or --query narrows it.",
                )
                .args(period_args())
                .arg(
                    Arg::new("view")
                        .long("view")
                        .value_parser(["daily", "weekly", "monthly"])
                        .default_value("daily"),
                )
                .arg(
                    Arg::new("chronological")
                        .long("chronological")
                        .action(ArgAction::SetTrue)
                        .help("Sort buckets by date instead of first appearance"),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("export")
                .about("Write the filtered transactions to a file")
                .args(period_args())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["csv", "json"])
                        .default_value("csv"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change client settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-url").arg(Arg::new("url").required(true)),
                ),
        )
}
