// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetrack::api::ApiError;
use budgetrack::aggregate::Granularity;
use budgetrack::commands::{auth, categories, charts, exporter, transactions};
use budgetrack::cli;
use budgetrack::models::TransactionType;
use common::{FakeBackend, logged_in, sample, session_in};
use tempfile::tempdir;

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["budgetrack"];
    argv.extend_from_slice(args);
    cli::build_cli().get_matches_from(argv)
}

/// Descend to the deepest subcommand's matches.
fn leaf(m: &clap::ArgMatches) -> &clap::ArgMatches {
    match m.subcommand() {
        Some((_, sub)) => leaf(sub),
        None => m,
    }
}

fn top(m: &clap::ArgMatches) -> &clap::ArgMatches {
    m.subcommand().map(|(_, s)| s).unwrap()
}

#[test]
fn list_filters_by_month_and_query() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with(sample());
    let mut session = logged_in(dir.path());
    let m = sub_matches(&["tx", "list", "--month", "1", "--year", "2024", "-q", "food"]);
    let rows = transactions::query_rows(&backend, &mut session, leaf(&m)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 2);
    assert_eq!(rows[0].amount, "40.00");
    assert_eq!(rows[0].date, "2024-01-06");
}

#[test]
fn month_out_of_range_is_rejected_by_parser() {
    let res = cli::build_cli().try_get_matches_from(["budgetrack", "tx", "list", "--month", "13"]);
    assert!(res.is_err());
}

#[test]
fn commands_need_a_session() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with(sample());
    let mut session = session_in(dir.path());
    let m = sub_matches(&["tx", "list", "--month", "1", "--year", "2024"]);
    let err = transactions::query_rows(&backend, &mut session, leaf(&m)).unwrap_err();
    assert!(err.to_string().contains("Not logged in"));
    assert_eq!(backend.list_calls.get(), 0);
}

#[test]
fn unauthorized_fetch_logs_out() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with(sample());
    backend.fail_with(ApiError::Unauthorized);
    let mut session = logged_in(dir.path());
    let m = sub_matches(&["tx", "list"]);
    assert!(transactions::query_rows(&backend, &mut session, leaf(&m)).is_err());
    assert!(!session.is_authenticated());
}

#[test]
fn add_validates_before_calling_backend() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with(Vec::new());
    let mut session = logged_in(dir.path());
    let m = sub_matches(&[
        "tx", "add", "--amount", "0", "--type", "expense", "--date", "2024-01-02",
    ]);
    let err = transactions::handle(&backend, &mut session, top(&m)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("amount"), "{}", msg);
    assert!(msg.contains("category"), "{}", msg);
    assert!(backend.rows.borrow().is_empty());
}

#[test]
fn add_then_update_overlays_given_fields() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with(Vec::new());
    let mut session = logged_in(dir.path());
    let m = sub_matches(&[
        "tx",
        "add",
        "--amount",
        "12.5",
        "--type",
        "income",
        "--category",
        "Gift",
        "--date",
        "2024-06-01",
    ]);
    transactions::handle(&backend, &mut session, top(&m)).unwrap();
    let id = backend.rows.borrow()[0].id;

    let id_arg = id.to_string();
    let m = sub_matches(&["tx", "update", "--id", &id_arg, "--new-category", "Bonus"]);
    transactions::handle(&backend, &mut session, top(&m)).unwrap();
    let row = backend.rows.borrow()[0].clone();
    assert_eq!(row.category, "Bonus");
    assert_eq!(row.amount.to_string(), "12.5");
    assert_eq!(row.transaction_type, TransactionType::Income);
}

#[test]
fn delete_with_yes_skips_prompt() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with(sample());
    let mut session = logged_in(dir.path());
    let m = sub_matches(&["tx", "delete", "--id", "3", "--yes"]);
    transactions::handle(&backend, &mut session, top(&m)).unwrap();
    let ids: Vec<i64> = backend.rows.borrow().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn add_reports_success_when_reload_fails() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with(sample());
    backend.fail_list_with(ApiError::Transport("down".into()));
    let mut session = logged_in(dir.path());
    let m = sub_matches(&[
        "tx", "add", "--amount", "8", "--type", "expense", "--category", "Food", "--date",
        "2024-01-09",
    ]);
    transactions::handle(&backend, &mut session, top(&m)).unwrap();
    assert_eq!(backend.rows.borrow().len(), 4);
    assert_eq!(backend.list_calls.get(), 1);
    assert!(session.is_authenticated());
}

#[test]
fn rejected_token_on_reload_still_logs_out() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with(sample());
    backend.fail_list_with(ApiError::Unauthorized);
    let mut session = logged_in(dir.path());
    let m = sub_matches(&["tx", "update", "--id", "2", "--amount", "41"]);
    transactions::handle(&backend, &mut session, top(&m)).unwrap();
    assert_eq!(backend.rows.borrow()[1].amount.to_string(), "41");
    assert!(!session.is_authenticated());
}

#[test]
fn update_of_zero_amount_record_needs_no_amount_flag() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with(vec![common::tx(
        4,
        TransactionType::Expense,
        "0",
        "Fees",
        "2024-03-03",
    )]);
    let mut session = logged_in(dir.path());
    let m = sub_matches(&["tx", "update", "--id", "4", "--category", "Bank"]);
    transactions::handle(&backend, &mut session, top(&m)).unwrap();
    let row = backend.rows.borrow()[0].clone();
    assert_eq!(row.category, "Bank");
    assert!(row.amount.amount().is_zero());
}

#[test]
fn login_stores_session_and_logout_clears_it() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::default();
    let mut session = session_in(dir.path());

    let m = sub_matches(&["auth", "login", "--email", "a@b.co", "--password", "wrong"]);
    assert!(auth::handle(&backend, &mut session, top(&m)).is_err());
    assert!(!session.is_authenticated());

    let m = sub_matches(&["auth", "login", "--email", "a@b.co", "--password", "secret1"]);
    auth::handle(&backend, &mut session, top(&m)).unwrap();
    assert_eq!(session.token(), Some("tok-123"));

    let m = sub_matches(&["auth", "logout"]);
    auth::handle(&backend, &mut session, top(&m)).unwrap();
    assert!(!session.is_authenticated());
}

#[test]
fn signup_checks_confirmation_locally() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::default();
    backend.fail_with(ApiError::Transport("must not be called".into()));
    let mut session = session_in(dir.path());
    let m = sub_matches(&[
        "auth",
        "signup",
        "--name",
        "Asha",
        "--email",
        "asha@example.com",
        "--password",
        "secret1",
        "--confirm-password",
        "secret2",
    ]);
    let err = auth::handle(&backend, &mut session, top(&m)).unwrap_err();
    assert!(err.to_string().contains("Passwords do not match."));
    assert!(backend.fail_next.borrow().is_some());
}

#[test]
fn category_add_posts_trimmed_name() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::default();
    let mut session = logged_in(dir.path());
    let m = sub_matches(&["category", "add", "--name", "  Pets "]);
    categories::handle(&backend, &mut session, top(&m)).unwrap();
    assert_eq!(*backend.categories.borrow(), vec!["Pets".to_string()]);
}

#[test]
fn chart_without_period_covers_everything() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with(sample());
    let mut session = logged_in(dir.path());
    let m = sub_matches(&["chart", "--view", "monthly"]);
    let data = charts::chart_data(&backend, &mut session, top(&m)).unwrap();
    assert_eq!(data.view, Granularity::Monthly);
    assert_eq!(data.series.labels, vec!["2024-01", "2024-02"]);
    assert_eq!(data.split.expense.to_string(), "50");

    let m = sub_matches(&["chart", "--month", "2", "--year", "2024"]);
    let data = charts::chart_data(&backend, &mut session, top(&m)).unwrap();
    assert_eq!(data.view, Granularity::Daily);
    assert_eq!(data.series.labels, vec!["2024-02-01"]);
}

#[test]
fn chart_tables_render_huge_amounts() {
    let dir = tempdir().unwrap();
    let big = "50000000000000000000000000000";
    let backend = FakeBackend::with(vec![
        common::tx(1, TransactionType::Income, big, "Lottery", "2024-01-01"),
        common::tx(2, TransactionType::Expense, big, "Yacht", "2024-01-01"),
        common::tx(3, TransactionType::Expense, big, "Yacht", "2024-01-01"),
    ]);
    let mut session = logged_in(dir.path());
    let m = sub_matches(&["chart"]);
    let data = charts::chart_data(&backend, &mut session, top(&m)).unwrap();
    let series = charts::series_table(&data.series).to_string();
    assert!(series.contains(&"#".repeat(30)), "{}", series);
    let split = charts::split_table(&data.split).to_string();
    assert!(split.contains("%"), "{}", split);
}

#[test]
fn export_writes_filtered_csv_and_json() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with(sample());
    let mut session = logged_in(dir.path());

    let csv_path = dir.path().join("jan.csv");
    let csv_arg = csv_path.to_string_lossy().to_string();
    let m = sub_matches(&["export", "--month", "1", "--year", "2024", "--out", &csv_arg]);
    exporter::handle(&backend, &mut session, top(&m)).unwrap();
    let text = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "id,date,transaction_type,category,amount,description");
    assert_eq!(lines[1], "1,2024-01-05,income,Salary,100.00,");
    assert_eq!(lines.len(), 3);

    let json_path = dir.path().join("jan.json");
    let json_arg = json_path.to_string_lossy().to_string();
    let m = sub_matches(&[
        "export", "--format", "json", "--month", "1", "--year", "2024", "-q", "food", "--out",
        &json_arg,
    ]);
    exporter::handle(&backend, &mut session, top(&m)).unwrap();
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["category"], "Food");
    assert_eq!(arr[0]["amount"], "40.00");
}
