// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use clap::{CommandFactory, Parser};

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["shade", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "shade",
        "-l",
        "4",
        "--dry",
        "--ini",
        "a.toml",
        "-i",
        "b.toml",
        "-s",
        "module/version=2.0",
        "repos",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(4));
    assert!(cli.global.dry);
    assert_eq!(cli.global.inis.len(), 2);
    assert!(matches!(cli.command, Some(Command::Repos)));
    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        "module/version=2.0",
        "global/output_log_level=4",
        "global/file_log_level=4",
        "global/dry=true",
    ]
    "#);
}

#[test]
fn test_file_log_level_overrides_console() {
    let cli = Cli::try_parse_from(["shade", "-l", "2", "--file-log-level", "5", "options"]).unwrap();
    let overrides = cli.global.to_config_overrides();
    assert!(overrides.contains(&"global/output_log_level=2".to_string()));
    assert!(overrides.contains(&"global/file_log_level=5".to_string()));
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["shade", "-l", "6", "version"]).is_err());
}

#[test]
fn test_parse_list() {
    let cli = Cli::try_parse_from(["shade", "list", "--aliases", "menu-*"]).unwrap();
    let Some(Command::List(args)) = cli.command else {
        panic!("expected list");
    };
    assert!(args.aliases);
    assert_eq!(args.modules, ["menu-*"]);
}

#[test]
fn test_parse_plan() {
    let cli = Cli::try_parse_from(["shade", "plan", "nbt", "utility-library", "--json"]).unwrap();
    let Some(Command::Plan(args)) = cli.command else {
        panic!("expected plan");
    };
    assert!(args.json);
    assert_eq!(args.modules, ["nbt", "utility-library"]);
}

#[test]
fn test_parse_publish() {
    let cli = Cli::try_parse_from(["shade", "publish", "--local-only"]).unwrap();
    let Some(Command::Publish(args)) = cli.command else {
        panic!("expected publish");
    };
    assert!(args.local_only);
    assert!(args.modules.is_empty());
}

#[test]
fn test_no_command() {
    let cli = Cli::try_parse_from(["shade"]).unwrap();
    assert!(cli.command.is_none());
}
