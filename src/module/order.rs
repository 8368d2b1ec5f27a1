// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency ordering of modules.
//!
//! ```text
//! utility-library --> menu-library, nbt, database
//! menu-library    --> item-creator
//!
//! waves: [database, item-creator, nbt] [menu-library] [utility-library]
//! ```
//!
//! Modules in one wave do not depend on each other and may be configured
//! concurrently. Names inside a wave are sorted.

use std::collections::{BTreeMap, BTreeSet};

use super::ModuleSpec;
use crate::error::ConfigError;

/// Checks that every dependency names a module of the table and that there
/// are no cycles.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownDependency`] or [`ConfigError::DependencyCycle`].
pub fn validate_dependencies(table: &[ModuleSpec]) -> Result<(), ConfigError> {
    let known: BTreeSet<&str> = table.iter().map(ModuleSpec::name).collect();
    for spec in table {
        if let Some(missing) = spec
            .dependencies
            .iter()
            .find(|dep| !known.contains(dep.as_str()))
        {
            return Err(ConfigError::UnknownDependency {
                module: spec.name().to_string(),
                dependency: missing.clone(),
            });
        }
    }
    dependency_waves(table).map(|_| ())
}

/// Groups modules into waves; every dependency of a module sits in an
/// earlier wave. Dependencies outside `specs` are ignored.
///
/// # Errors
///
/// Returns [`ConfigError::DependencyCycle`] naming one cycle.
pub fn dependency_waves(specs: &[ModuleSpec]) -> Result<Vec<Vec<String>>, ConfigError> {
    let selected: BTreeSet<&str> = specs.iter().map(ModuleSpec::name).collect();

    let mut pending: BTreeMap<&str, BTreeSet<&str>> = specs
        .iter()
        .map(|spec| {
            let deps = spec
                .dependencies
                .iter()
                .map(String::as_str)
                .filter(|dep| selected.contains(dep))
                .collect();
            (spec.name(), deps)
        })
        .collect();

    let mut waves = Vec::new();
    while !pending.is_empty() {
        let ready: Vec<&str> = pending
            .iter()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(name, _)| *name)
            .collect();

        if ready.is_empty() {
            return Err(ConfigError::DependencyCycle {
                modules: find_cycle(&pending),
            });
        }

        for name in &ready {
            pending.remove(name);
        }
        for deps in pending.values_mut() {
            for name in &ready {
                deps.remove(name);
            }
        }
        waves.push(ready.into_iter().map(str::to_string).collect());
    }

    Ok(waves)
}

/// Walks unresolved dependencies until a module repeats.
fn find_cycle(pending: &BTreeMap<&str, BTreeSet<&str>>) -> Vec<String> {
    let Some(start) = pending.keys().next() else {
        return Vec::new();
    };

    let mut path: Vec<&str> = vec![*start];
    let mut current = *start;
    loop {
        let Some(next) = pending
            .get(current)
            .and_then(|deps| deps.iter().next().copied())
        else {
            return path.into_iter().map(str::to_string).collect();
        };

        if let Some(pos) = path.iter().position(|name| *name == next) {
            let mut cycle: Vec<String> = path[pos..].iter().map(|s| (*s).to_string()).collect();
            cycle.push(next.to_string());
            return cycle;
        }
        path.push(next);
        current = next;
    }
}

/// Adds every transitive dependency of `selected` found in `table`.
///
/// The result keeps the order of `table`.
#[must_use]
pub fn with_dependencies(table: &[ModuleSpec], selected: &[String]) -> Vec<String> {
    let by_name: BTreeMap<&str, &ModuleSpec> = table.iter().map(|s| (s.name(), s)).collect();
    let mut closure: BTreeSet<&str> = BTreeSet::new();
    let mut stack: Vec<&str> = selected.iter().map(String::as_str).collect();

    while let Some(name) = stack.pop() {
        let Some(spec) = by_name.get(name) else {
            continue;
        };
        if closure.insert(spec.name()) {
            stack.extend(spec.dependencies.iter().map(String::as_str));
        }
    }

    table
        .iter()
        .map(ModuleSpec::name)
        .filter(|name| closure.contains(name))
        .map(str::to_string)
        .collect()
}
