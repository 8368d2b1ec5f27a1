// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Modules of a multi-package repository.
//!
//! ```text
//! [module] defaults + [modules.<name>] row
//!        |
//!        v
//!   ModuleSpec  (module + dependencies + relocations + exclusions)
//!        |
//!        v
//!   Module { name, group, version, description }   id = group:name
//! ```

pub mod order;
pub mod registry;

use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Identity of a module: `(group, name)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleId {
    pub group: String,
    pub name: String,
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

/// One independently versioned, independently publishable package.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct Module {
    name: String,
    group: String,
    version: String,
    #[builder(default)]
    description: String,
}

impl Module {
    /// Module name, unique within the table.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maven group id.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Module version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Group and name of the module.
    #[must_use]
    pub fn id(&self) -> ModuleId {
        ModuleId {
            group: self.group.clone(),
            name: self.name.clone(),
        }
    }

    /// Bumps the version; identity is unchanged.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// Returns the name, failing if it is blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for an empty or whitespace name.
    pub fn require_name(&self) -> Result<&str, ConfigError> {
        self.require("name", &self.name)
    }

    /// Returns the version, failing if it is blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for an empty or whitespace version.
    pub fn require_version(&self) -> Result<&str, ConfigError> {
        self.require("version", &self.version)
    }

    /// Returns the group, failing if it is blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for an empty or whitespace group.
    pub fn require_group(&self) -> Result<&str, ConfigError> {
        self.require("group", &self.group)
    }

    /// Checks every required field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::MissingField`] found, in the order
    /// name, group, version.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.require_name()?;
        self.require_group()?;
        self.require_version()?;
        Ok(())
    }

    fn require<'a>(&self, field: &'static str, value: &'a str) -> Result<&'a str, ConfigError> {
        if value.trim().is_empty() {
            Err(ConfigError::MissingField {
                module: self.label(),
                field,
            })
        } else {
            Ok(value)
        }
    }

    fn label(&self) -> String {
        if self.name.trim().is_empty() {
            "<unnamed>".to_string()
        } else {
            self.name.clone()
        }
    }
}

/// A module together with its packaging inputs from the module table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSpec {
    pub module: Module,
    /// Sibling modules that must be configured first.
    pub dependencies: Vec<String>,
    /// Packages relocated under `{group}.dependencies`.
    pub relocations: Vec<String>,
    /// Exclusions on top of the standard policy.
    pub exclusions: Vec<String>,
}

impl ModuleSpec {
    /// A spec with no dependencies, relocations or extra exclusions.
    #[must_use]
    pub const fn new(module: Module) -> Self {
        Self {
            module,
            dependencies: Vec::new(),
            relocations: Vec::new(),
            exclusions: Vec::new(),
        }
    }

    /// Name of the module.
    #[must_use]
    pub fn name(&self) -> &str {
        self.module.name()
    }

    /// Sets the sibling modules configured before this one.
    #[must_use]
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the packages relocated into the shaded archive.
    #[must_use]
    pub fn with_relocations(
        mut self,
        packages: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.relocations = packages.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the exclusions added to the standard policy.
    #[must_use]
    pub fn with_exclusions(
        mut self,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.exclusions = patterns.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests;
