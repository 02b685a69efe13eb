// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI parsing tests for gitviz
//!
//! These tests verify flag parsing, subcommand selection and log level
//! determination.

use std::path::PathBuf;

use clap::Parser;
use gitviz::command::CommandId;
use gitviz::config::{Config, OutputFormat};
use tracing::Level;

// ============================================================================
// Subcommands
// ============================================================================

#[test]
fn test_no_subcommand_defaults_to_list() {
    let config = Config::try_parse_from(["gitviz"]).expect("parse should succeed");
    assert!(config.command.is_none());
    assert_eq!(config.command_id(), CommandId::List);
}

#[test]
fn test_subcommands() {
    for (name, id) in [
        ("list", CommandId::List),
        ("summary", CommandId::Summary),
        ("refs", CommandId::Refs),
    ] {
        let config = Config::try_parse_from(["gitviz", name]).expect("parse should succeed");
        assert_eq!(config.command_id(), id);
        assert_eq!(id.name(), name);
    }
}

#[test]
fn test_unknown_subcommand_fails() {
    assert!(Config::try_parse_from(["gitviz", "render"]).is_err());
}

// ============================================================================
// Source options
// ============================================================================

#[test]
fn test_repo_flag() {
    let config =
        Config::try_parse_from(["gitviz", "--repo", "/tmp/repo"]).expect("parse should succeed");
    assert_eq!(config.repo, Some(PathBuf::from("/tmp/repo")));
}

#[test]
fn test_input_stdin() {
    let config = Config::try_parse_from(["gitviz", "-i", "-"]).expect("parse should succeed");
    assert!(config.reads_stdin());
}

#[test]
fn test_max_count_and_all() {
    let config = Config::try_parse_from(["gitviz", "-n", "50", "--all", "summary"])
        .expect("parse should succeed");
    assert_eq!(config.max_count, Some(50));
    assert!(config.all);
    assert_eq!(config.command_id(), CommandId::Summary);
}

#[test]
fn test_max_count_rejects_non_number() {
    assert!(Config::try_parse_from(["gitviz", "-n", "many"]).is_err());
}

// ============================================================================
// Output format
// ============================================================================

#[test]
fn test_format_default_text() {
    let config = Config::try_parse_from(["gitviz"]).expect("parse should succeed");
    assert_eq!(config.format, OutputFormat::Text);
}

#[test]
fn test_format_json() {
    let config =
        Config::try_parse_from(["gitviz", "--format", "json"]).expect("parse should succeed");
    assert_eq!(config.format, OutputFormat::Json);
}

#[test]
fn test_format_rejects_unknown() {
    assert!(Config::try_parse_from(["gitviz", "--format", "svg"]).is_err());
}

// ============================================================================
// Logging flags
// ============================================================================

#[test]
fn test_verbose_sets_debug_log_level() {
    let config = Config::try_parse_from(["gitviz", "-v"]).expect("parse should succeed");
    assert!(config.verbose);
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_quiet_sets_warn_log_level() {
    let config = Config::try_parse_from(["gitviz", "--quiet"]).expect("parse should succeed");
    assert!(config.quiet);
    assert_eq!(config.log_level(), Level::WARN);
}

#[test]
fn test_verbose_wins_over_quiet() {
    let config = Config::try_parse_from(["gitviz", "-v", "-q"]).expect("parse should succeed");
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_verbose_flag_value_syntax_not_supported() {
    // Boolean flags are toggled by presence only
    let result = Config::try_parse_from(["gitviz", "--verbose=true"]);
    assert!(result.is_err());
}
