// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for shade-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, ModuleConfig (+ per-module overrides),
//!         RepositoriesConfig, PublicationConfig, PathsConfig
//! Aliases: alias name → [module patterns]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::module::{Module, ModuleSpec};
use crate::publish::descriptor::Developer;
use crate::repository::Repository;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Log instead of writing into repositories.
    pub dry: bool,
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Maximum modules configured at once (default: CPU count).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::Info,
            file_log_level: LogLevel::Trace,
            log_file: None,
            concurrency: None,
        }
    }
}

/// Aliases mapping alias names to module patterns.
pub type Aliases = BTreeMap<String, Vec<String>>;

/// One row of the module table, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleConfig {
    /// Whether the module takes part in `plan`/`publish`.
    pub enabled: bool,
    /// Maven group id, dotted.
    pub group: String,
    /// Version, may be a placeholder such as `1.0-SNAPSHOT`.
    pub version: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Sibling modules configured before this one.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Embedded packages relocated under `{group}.dependencies`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relocations: Vec<String>,
    /// Exclusions added to the standard policy.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<String>,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            group: String::new(),
            version: String::new(),
            description: String::new(),
            dependencies: Vec::new(),
            relocations: Vec::new(),
            exclusions: Vec::new(),
        }
    }
}

impl ModuleConfig {
    /// Builds the module spec for the row named `name`.
    ///
    /// A dependency on `name` itself is dropped; a glob row such as
    /// `[modules."menu-*"]` may list a module it also matches.
    #[must_use]
    pub fn to_spec(&self, name: &str) -> ModuleSpec {
        let module = Module::builder()
            .name(name)
            .group(self.group.clone())
            .version(self.version.clone())
            .description(self.description.clone())
            .build();
        ModuleSpec::new(module)
            .with_dependencies(self.dependencies.iter().filter(|dep| *dep != name).cloned())
            .with_relocations(self.relocations.iter().cloned())
            .with_exclusions(self.exclusions.iter().cloned())
    }
}

/// Repository list configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoriesConfig {
    /// Include the built-in repositories.
    pub defaults: bool,
    /// Repositories appended after the built-ins.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<Repository>,
}

impl Default for RepositoriesConfig {
    fn default() -> Self {
        Self {
            defaults: true,
            extra: Vec::new(),
        }
    }
}

/// POM defaults and publication targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublicationConfig {
    /// Project URL written to every POM.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// Developers written to every POM.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub developers: Vec<Developer>,
    /// SCM connection (default: derived from `url`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub scm_connection: String,
    /// SCM developer connection (default: derived from `url`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub scm_developer_connection: String,
    /// Suffix of publication ids: `{module}_{id_suffix}`.
    pub id_suffix: String,
    /// Remote repository appointed next to the local one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<Repository>,
}

impl Default for PublicationConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            developers: Vec::new(),
            scm_connection: String::new(),
            scm_developer_connection: String::new(),
            id_suffix: "mavenJava".to_string(),
            remote: None,
        }
    }
}

impl PublicationConfig {
    /// SCM connection, derived from a `https://host/path` project URL
    /// when not set.
    #[must_use]
    pub fn scm_connection(&self) -> String {
        if self.scm_connection.is_empty() {
            self.derive_scm("git")
        } else {
            self.scm_connection.clone()
        }
    }

    /// SCM developer connection, derived like [`Self::scm_connection`].
    #[must_use]
    pub fn scm_developer_connection(&self) -> String {
        if self.scm_developer_connection.is_empty() {
            self.derive_scm("ssh")
        } else {
            self.scm_developer_connection.clone()
        }
    }

    fn derive_scm(&self, scheme: &str) -> String {
        self.url
            .strip_prefix("https://")
            .or_else(|| self.url.strip_prefix("http://"))
            .map(|rest| format!("scm:git:{scheme}://{rest}"))
            .unwrap_or_default()
    }
}
