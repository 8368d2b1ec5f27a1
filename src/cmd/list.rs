// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for shade-rs.

use crate::cli::modules::ListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::module::registry::ModuleRegistry;

/// Builds the selection registry over the module table.
#[must_use]
pub fn module_registry(config: &Config) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new(config.aliases.clone());
    registry.register_all(config.module_names());
    registry
}

/// Lines printed by `list`.
///
/// # Errors
///
/// Returns an error if a pattern is not a valid glob.
pub fn format_list(args: &ListArgs, config: &Config) -> Result<Vec<String>> {
    if args.aliases {
        if config.aliases.is_empty() {
            return Ok(vec!["No aliases defined".to_string()]);
        }
        return Ok(config
            .aliases
            .iter()
            .map(|(name, targets)| format!("{} = {}", name, targets.join(", ")))
            .collect());
    }

    let registry = module_registry(config);
    let names = registry.resolve(&args.modules)?;
    if names.is_empty() {
        return Ok(vec!["No modules found".to_string()]);
    }

    Ok(names
        .iter()
        .map(|name| {
            let row = config.module_config(name);
            let mut line = format!("{name} {}:{}", row.group, row.version);
            if !row.enabled {
                line.push_str(" (disabled)");
            }
            if !row.dependencies.is_empty() {
                line.push_str(&format!(" <- {}", row.dependencies.join(", ")));
            }
            line
        })
        .collect())
}

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if module resolution fails.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    for line in format_list(args, config)? {
        println!("{line}");
    }
    Ok(())
}
