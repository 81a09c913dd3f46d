//! Tests for the solve subcommand.

use super::parse;
use clap::Parser;
use crate::cli::{CliCommand, OutputFormat, SearchArgs};
use rdp_core::catalog::Lookup;
use rdp_core::config::RdpConfig;
use std::path::Path;

#[test]
fn cli_parse_solve_stdin() {
    match parse(&["rdp", "solve"]) {
        CliCommand::Solve {
            input,
            format,
            show_chunks,
            search,
        } => {
            assert!(input.is_none());
            assert_eq!(format, OutputFormat::Text);
            assert!(!show_chunks);
            assert!(!search.no_bound);
            assert!(!search.no_dominance);
            assert!(search.lookup.is_none());
        }
        _ => panic!("expected Solve"),
    }
}

#[test]
fn cli_parse_solve_file_and_flags() {
    match parse(&[
        "rdp",
        "solve",
        "inputs/first.input",
        "--format",
        "json",
        "--show-chunks",
        "--no-bound",
        "--lookup",
        "linear",
    ]) {
        CliCommand::Solve {
            input,
            format,
            show_chunks,
            search,
        } => {
            assert_eq!(input.as_deref(), Some(Path::new("inputs/first.input")));
            assert_eq!(format, OutputFormat::Json);
            assert!(show_chunks);
            assert!(search.no_bound);
            assert!(!search.no_dominance);
            assert_eq!(search.lookup, Some(Lookup::Linear));
        }
        _ => panic!("expected Solve with flags"),
    }
}

#[test]
fn cli_parse_solve_rejects_unknown_lookup() {
    assert!(crate::cli::Cli::try_parse_from(["rdp", "solve", "--lookup", "tree"]).is_err());
}

#[test]
fn search_args_override_config() {
    let cfg = RdpConfig::default();
    let args = SearchArgs {
        no_bound: true,
        no_dominance: true,
        lookup: Some(Lookup::Linear),
    };
    let planner = args.planner(&cfg);
    assert!(!planner.search.bound);
    assert!(!planner.search.dominance);
    assert_eq!(planner.lookup, Lookup::Linear);

    let planner = SearchArgs::default().planner(&cfg);
    assert!(planner.search.bound);
    assert_eq!(planner.lookup, Lookup::Indexed);
}
