use clap::Parser;
use std::path::PathBuf;
use tracetab::{Cli, Command};

#[test]
fn check_parses_query_and_defaults_max_rows() {
    let cli = Cli::try_parse_from(["tracetab", "check", "traces | take 5"])
        .expect("check should parse");
    let Command::Check(args) = cli.command else {
        panic!("expected check subcommand");
    };
    assert_eq!(args.query, "traces | take 5");
    assert_eq!(args.max_rows, 100);
}

#[test]
fn check_accepts_explicit_max_rows() {
    let cli = Cli::try_parse_from(["tracetab", "check", "traces", "--max-rows", "50"])
        .expect("check should parse");
    let Command::Check(args) = cli.command else {
        panic!("expected check subcommand");
    };
    assert_eq!(args.max_rows, 50);
}

#[test]
fn table_defaults_match_the_flattening_bounds() {
    let cli = Cli::try_parse_from(["tracetab", "table", "results.json"])
        .expect("table should parse");
    let Command::Table(args) = cli.command else {
        panic!("expected table subcommand");
    };
    assert_eq!(args.results, PathBuf::from("results.json"));
    assert_eq!(args.max_rows_shown, None);
    assert_eq!(args.max_depth, 2);
    assert_eq!(args.max_entries, 200);
}

#[test]
fn table_accepts_a_visible_row_bound() {
    let cli = Cli::try_parse_from(["tracetab", "table", "results.json", "--max-rows-shown", "30"])
        .expect("table should parse");
    let Command::Table(args) = cli.command else {
        panic!("expected table subcommand");
    };
    assert_eq!(args.max_rows_shown, Some(30));
}

#[test]
fn details_requires_a_row_index() {
    assert!(Cli::try_parse_from(["tracetab", "details", "results.json"]).is_err());

    let cli = Cli::try_parse_from(["tracetab", "details", "results.json", "--row", "3"])
        .expect("details should parse");
    let Command::Details(args) = cli.command else {
        panic!("expected details subcommand");
    };
    assert_eq!(args.row, 3);
}

#[test]
fn schema_takes_no_arguments() {
    let cli = Cli::try_parse_from(["tracetab", "schema"]).expect("schema should parse");
    assert!(matches!(cli.command, Command::Schema(_)));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["tracetab", "export"]).is_err());
}
