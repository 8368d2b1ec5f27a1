// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for shade-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! shade [global options] <command>
//! version
//! options
//! inis
//! list [--aliases] [PATTERN...]
//! repos
//! plan [MODULE...] [--json]
//! publish [MODULE...] [--local-only]
//! ```

pub mod global;
pub mod modules;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::modules::{ListArgs, PlanArgs, PublishArgs};
use clap::{Parser, Subcommand};

/// Multi-module packaging coordinator.
///
/// Applies repository resolution, shaded archive planning and Maven
/// publication uniformly to every module of a repository.
#[derive(Debug, Parser)]
#[command(
    name = "shade",
    author,
    version,
    about = "Multi-module packaging coordinator",
    long_about = "shade-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Plans shaded archives and Maven publications for every module\n\
                  of a multi-module repository from one module table.\n\n\
                  `shade plan` shows what every module would produce; `shade\n\
                  publish` registers the publications and installs them into\n\
                  the local repository. See `shade <command> --help` for more.",
    after_help = "CONFIGURATION:\n\n\
                  shade reads `shade.toml` from the current directory if it\n\
                  exists, then every --ini file in order, then SHADE_* environment\n\
                  variables (SHADE_GLOBAL__DRY=true), then --set options. Later\n\
                  sources override earlier ones."
)]
/// Command-line interface of `shade`.
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files in load order.
    Inis,

    /// Lists modules and aliases.
    List(ListArgs),

    /// Lists the repositories every module resolves against.
    Repos,

    /// Plans archives and publications without writing anything.
    Plan(PlanArgs),

    /// Registers publications and installs them into the local repository.
    Publish(PublishArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
