// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the module commands.

use clap::Args;

/// Arguments for `list`.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Shows only aliases.
    #[arg(short = 'i', long)]
    pub aliases: bool,

    /// Shows only the modules these patterns or aliases select.
    #[arg(value_name = "PATTERN")]
    pub modules: Vec<String>,
}

/// Arguments for `plan`.
#[derive(Debug, Clone, Default, Args)]
pub struct PlanArgs {
    /// Modules to plan (names, globs or aliases); all enabled modules if empty.
    /// Dependencies of selected modules are added.
    #[arg(value_name = "MODULE")]
    pub modules: Vec<String>,

    /// Prints the plans as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `publish`.
#[derive(Debug, Clone, Default, Args)]
pub struct PublishArgs {
    /// Modules to publish (names, globs or aliases); all enabled modules if empty.
    /// Dependencies of selected modules are added.
    #[arg(value_name = "MODULE")]
    pub modules: Vec<String>,

    /// Appoints only the local repository, even if a remote is configured.
    #[arg(long = "local-only")]
    pub local_only: bool,
}
