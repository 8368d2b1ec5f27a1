// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shaded archive planning.
//!
//! ```text
//! Module + relocations + extra exclusions + staged entries
//!        |
//!        v
//! ShadeCoordinator::plan()
//!   archive_name()       {name}-{version}.jar
//!   RelocationRule       {package} -> {group}.dependencies.{package}
//!   apply_exclusions()   standard policy + module extras
//!        |
//!        v
//! ShadePlan { archive_name, relocations, excluded, included }
//! ```
//!
//! Nothing here reads or writes archives; the plan is what a packaging
//! step would execute.

pub mod exclusion;
pub mod relocation;


use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::module::Module;

use exclusion::ExclusionPolicy;
use relocation::RelocationRule;

/// File name of a module's merged archive: `{name}-{version}.jar`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] if the name or version is blank.
pub fn archive_name(module: &Module) -> Result<String, ConfigError> {
    let name = module.require_name()?;
    let version = module.require_version()?;
    Ok(format!("{name}-{version}.jar"))
}

/// Relocated package name: `{group}.dependencies.{package}`.
#[must_use]
pub fn relocation_target(module: &Module, package: &str) -> String {
    format!("{}.dependencies.{package}", module.group())
}

/// Entries of one merged archive and the subset excluded from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveSpec {
    pub archive_name: String,
    pub entries: BTreeSet<String>,
    pub excluded: BTreeSet<String>,
    pub relocations: Vec<RelocationRule>,
}

impl ArchiveSpec {
    /// Creates a spec over `entries` with nothing excluded yet.
    pub fn new(
        archive_name: impl Into<String>,
        entries: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            archive_name: archive_name.into(),
            entries: entries.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Entries that end up in the archive.
    pub fn included(&self) -> impl Iterator<Item = &str> {
        self.entries.difference(&self.excluded).map(String::as_str)
    }
}

/// Marks every entry matched by `policy` as excluded.
///
/// Returns how many entries were newly excluded; applying the same policy
/// again returns 0.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPattern`] if a glob fails to compile.
pub fn apply_exclusions(
    spec: &mut ArchiveSpec,
    policy: &ExclusionPolicy,
) -> Result<usize, ConfigError> {
    let matched = policy.matching(spec.entries.iter().map(String::as_str))?;
    let before = spec.excluded.len();
    spec.excluded.extend(matched);
    Ok(spec.excluded.len() - before)
}

/// An included entry and its path inside the merged archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedEntry {
    pub source: String,
    pub target: String,
}

impl PlannedEntry {
    /// Whether a relocation rule moved the entry.
    #[must_use]
    pub fn is_relocated(&self) -> bool {
        self.source != self.target
    }
}

/// Everything needed to build one module's merged archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShadePlan {
    pub archive_name: String,
    pub relocations: Vec<RelocationRule>,
    pub excluded: BTreeSet<String>,
    pub included: Vec<PlannedEntry>,
}

/// Plans merged archives against a base exclusion policy.
#[derive(Debug, Clone, Copy)]
pub struct ShadeCoordinator<'p> {
    base: &'p ExclusionPolicy,
}

impl Default for ShadeCoordinator<'static> {
    fn default() -> Self {
        Self::new(ExclusionPolicy::standard())
    }
}

impl<'p> ShadeCoordinator<'p> {
    /// Creates a coordinator over `base`.
    #[must_use]
    pub const fn new(base: &'p ExclusionPolicy) -> Self {
        Self { base }
    }

    /// Policy shared by every module.
    #[must_use]
    pub const fn base_policy(&self) -> &'p ExclusionPolicy {
        self.base
    }

    /// Policy for one module: the base policy plus its extra patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for an invalid extra pattern.
    pub fn policy_for(&self, extra: &[String]) -> Result<ExclusionPolicy, ConfigError> {
        self.base.with_extra(extra)
    }

    /// Plans the merged archive of `module`.
    ///
    /// The first relocation rule covering an entry decides its target.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a blank name, version or group, a blank
    /// relocation package, or an invalid exclusion pattern.
    pub fn plan(
        &self,
        module: &Module,
        relocations: &[String],
        extra_exclusions: &[String],
        entries: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<ShadePlan, ConfigError> {
        let name = archive_name(module)?;
        let rules = relocations
            .iter()
            .map(|package| RelocationRule::for_module(module, package))
            .collect::<Result<Vec<_>, _>>()?;
        let policy = self.policy_for(extra_exclusions)?;

        let mut spec = ArchiveSpec::new(name, entries);
        spec.relocations = rules;
        let excluded = apply_exclusions(&mut spec, &policy)?;
        debug!(
            module = module.name(),
            archive = %spec.archive_name,
            entries = spec.entries.len(),
            excluded,
            "Planned shaded archive"
        );

        let included = spec
            .included()
            .map(|entry| PlannedEntry {
                source: entry.to_string(),
                target: spec
                    .relocations
                    .iter()
                    .find_map(|rule| rule.apply(entry))
                    .unwrap_or_else(|| entry.to_string()),
            })
            .collect();

        Ok(ShadePlan {
            archive_name: spec.archive_name,
            relocations: spec.relocations,
            excluded: spec.excluded,
            included,
        })
    }
}
