// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for shade-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. shade.toml (cwd)
//! 3. --ini FILE...
//! 4. SHADE_* env vars
//! 5. --set section/key=value
//! ```
//!
//! # The Module Table
//!
//! ```toml
//! [module]                      # defaults for every row
//! group = "org.broken.arrow.library"
//! version = "1.0-SNAPSHOT"
//!
//! [modules.nbt]                 # one row per module
//! relocations = ["de.tr7zw.changeme.nbtapi"]
//!
//! [modules.utility-library]
//! dependencies = ["nbt", "menu-library"]
//! exclusions = ["de/tr7zw/changeme/nbtapi/"]
//!
//! [modules."menu-*"]            # glob row: overrides, never a module
//! version = "0.107"
//! ```
//!
//! Resolution for one module: `[module]` < first matching glob row < exact row.

pub mod loader;
pub mod merge;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use wax::Program as _;

use crate::error::{ConfigError, Result};
use crate::module::ModuleSpec;
use crate::module::order::validate_dependencies;

use loader::ConfigLoader;
use merge::ModuleConfigOverride;
use paths::PathsConfig;
use types::{Aliases, GlobalConfig, ModuleConfig, PublicationConfig, RepositoriesConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Defaults shared by every module row.
    pub module: ModuleConfig,
    /// The module table: rows by name, or overrides by glob.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub modules: BTreeMap<String, ModuleConfigOverride>,
    /// Module selection aliases.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: Aliases,
    /// Dependency repositories.
    pub repositories: RepositoriesConfig,
    /// POM defaults and publication targets.
    pub publication: PublicationConfig,
    /// Paths configuration.
    pub paths: PathsConfig,
}

/// Whether a `[modules.*]` key is a glob override rather than a module.
#[must_use]
pub fn is_glob_key(key: &str) -> bool {
    key.contains(['*', '?', '[', '{'])
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shade_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("shade.toml")
    ///     .with_env_prefix("SHADE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is invalid TOML, or does
    /// not describe a consistent module table.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not
    /// describe a consistent module table.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Names of the concrete modules in the table, sorted.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules
            .keys()
            .map(String::as_str)
            .filter(|key| !is_glob_key(key))
    }

    /// Effective configuration of one module.
    ///
    /// Resolution order (later wins):
    /// 1. `[module]` defaults
    /// 2. first glob row matching the name (e.g. `[modules."menu-*"]`)
    /// 3. exact row (`[modules.<name>]`)
    #[must_use]
    pub fn module_config(&self, name: &str) -> ModuleConfig {
        let mut config = self.module.clone();

        let glob_row = self
            .modules
            .iter()
            .filter(|(key, _)| is_glob_key(key))
            .find(|(key, _)| {
                wax::Glob::new(key.as_str()).is_ok_and(|glob| glob.is_match(name))
            });
        if let Some((_, row)) = glob_row {
            config = merge::merge_module_config(&config, row);
        }

        if let Some(row) = self.modules.get(name) {
            config = merge::merge_module_config(&config, row);
        }

        config
    }

    /// Every module of the table, including disabled ones.
    #[must_use]
    pub fn module_table(&self) -> Vec<ModuleSpec> {
        self.module_names()
            .map(|name| self.module_config(name).to_spec(name))
            .collect()
    }

    /// Resolve paths and validate everything that is shared by all modules.
    ///
    /// Per-module fields (empty version, ...) are not checked here; they
    /// fail only the module concerned.
    ///
    /// # Errors
    ///
    /// Returns an error for unresolvable paths, invalid repository URLs,
    /// invalid glob rows, `dependencies` in `[module]`, unknown
    /// dependencies or dependency cycles.
    pub fn resolve_and_validate(&mut self) -> std::result::Result<(), ConfigError> {
        self.paths.resolve()?;

        for repo in &self.repositories.extra {
            repo.validate()?;
        }
        if let Some(remote) = &self.publication.remote {
            remote.validate()?;
        }

        for key in self.modules.keys().filter(|key| is_glob_key(key)) {
            wax::Glob::new(key).map_err(|e| ConfigError::InvalidPattern {
                pattern: key.clone(),
                message: e.to_string(),
            })?;
        }

        if !self.module.dependencies.is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "module".to_string(),
                key: "dependencies".to_string(),
                message: "dependencies are set per module row, not as a default".to_string(),
            });
        }

        for (alias, targets) in &self.aliases {
            if targets.is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: "aliases".to_string(),
                    key: alias.clone(),
                    message: "alias has no targets".to_string(),
                });
            }
        }

        validate_dependencies(&self.module_table())
    }

    /// Format configuration options for display, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_module_options(&mut options);
        self.format_repository_options(&mut options);
        self.format_publication_options(&mut options);
        self.format_paths_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(log_file) = &self.global.log_file {
            options.insert("global.log_file".into(), log_file.display().to_string());
        }
        if let Some(concurrency) = self.global.concurrency {
            options.insert("global.concurrency".into(), concurrency.to_string());
        }
    }

    fn format_module_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("module.group".into(), self.module.group.clone());
        options.insert("module.version".into(), self.module.version.clone());

        for name in self.module_names() {
            let row = self.module_config(name);
            let prefix = format!("modules.{name}");
            options.insert(format!("{prefix}.enabled"), row.enabled.to_string());
            options.insert(format!("{prefix}.group"), row.group.clone());
            options.insert(format!("{prefix}.version"), row.version.clone());
            if !row.dependencies.is_empty() {
                options.insert(format!("{prefix}.dependencies"), row.dependencies.join(", "));
            }
            if !row.relocations.is_empty() {
                options.insert(format!("{prefix}.relocations"), row.relocations.join(", "));
            }
            if !row.exclusions.is_empty() {
                options.insert(format!("{prefix}.exclusions"), row.exclusions.join(", "));
            }
        }
    }

    fn format_repository_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "repositories.defaults".into(),
            self.repositories.defaults.to_string(),
        );
        for repo in &self.repositories.extra {
            options.insert(format!("repositories.extra.{}", repo.name), repo.url.clone());
        }
    }

    fn format_publication_options(&self, options: &mut BTreeMap<String, String>) {
        let publication = &self.publication;
        options.insert("publication.url".into(), publication.url.clone());
        options.insert("publication.id_suffix".into(), publication.id_suffix.clone());
        options.insert(
            "publication.scm_connection".into(),
            publication.scm_connection(),
        );
        options.insert(
            "publication.scm_developer_connection".into(),
            publication.scm_developer_connection(),
        );
        options.insert(
            "publication.developers".into(),
            publication
                .developers
                .iter()
                .map(|d| d.id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        );
        if let Some(remote) = &publication.remote {
            options.insert("publication.remote".into(), remote.url.clone());
        }
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        let fmt = |p: &Option<std::path::PathBuf>| {
            p.as_ref()
                .map_or_else(String::new, |p| p.display().to_string())
        };

        options.insert("paths.root".into(), fmt(&self.paths.root));
        options.insert("paths.build".into(), fmt(&self.paths.build));
        options.insert(
            "paths.local_repository".into(),
            fmt(&self.paths.local_repository),
        );
    }
}
