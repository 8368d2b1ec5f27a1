// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repos command implementation for shade-rs.

use crate::config::Config;
use crate::repository::RepositoryResolver;

/// Lines printed by `repos`: `name  url`, aligned, in precedence order.
#[must_use]
pub fn format_repositories(config: &Config) -> Vec<String> {
    let resolver =
        RepositoryResolver::new(&config.repositories, &config.paths.local_repository_dir());
    let repositories = resolver.resolve_repositories();
    let width = repositories.iter().map(|r| r.name.len()).max().unwrap_or(0);

    repositories
        .iter()
        .map(|repo| format!("{:<width$}  {}", repo.name, repo.url))
        .collect()
}

/// Main handler for repos command.
pub fn run_repos_command(config: &Config) {
    for line in format_repositories(config) {
        println!("{line}");
    }
}
