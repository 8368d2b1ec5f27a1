// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! root/
//!   build/                 (build)
//!     <module>/
//!       classes/           (staged archive entries)
//!       libs/              (produced jars)
//!
//! ~/.m2/repository         (local_repository)
//! ```
//!
//! Relative paths are resolved against `root`; `root` defaults to the
//! current directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Build output and repository locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Repository root holding the modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Build output directory (default: root/build).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<PathBuf>,
    /// Filesystem-backed Maven repository (default: ~/.m2/repository).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_repository: Option<PathBuf>,
}

impl PathsConfig {
    /// Fill in defaults and make relative paths absolute against `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `local_repository` is unset
    /// and no home directory is known.
    pub fn resolve(&mut self) -> Result<(), ConfigError> {
        self.resolve_with_home(home_dir().as_deref())
    }

    pub(crate) fn resolve_with_home(&mut self, home: Option<&Path>) -> Result<(), ConfigError> {
        let root = self.root.clone().unwrap_or_else(|| PathBuf::from("."));

        let resolve = |path: &mut Option<PathBuf>, default: &str| match path {
            Some(p) if p.is_relative() => *path = Some(root.join(p.as_path())),
            None => *path = Some(root.join(default)),
            _ => {}
        };
        resolve(&mut self.build, "build");

        match &self.local_repository {
            Some(p) if p.is_relative() => self.local_repository = Some(root.join(p)),
            Some(_) => {}
            None => {
                let home = home.ok_or_else(|| ConfigError::InvalidValue {
                    section: "paths".to_string(),
                    key: "local_repository".to_string(),
                    message: "not set and no home directory is known".to_string(),
                })?;
                self.local_repository = Some(home.join(".m2").join("repository"));
            }
        }

        self.root = Some(root);
        Ok(())
    }

    /// Build directory, `build` if unresolved.
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.build.clone().unwrap_or_else(|| PathBuf::from("build"))
    }

    /// Local repository root, `.m2/repository` if unresolved.
    #[must_use]
    pub fn local_repository_dir(&self) -> PathBuf {
        self.local_repository
            .clone()
            .unwrap_or_else(|| PathBuf::from(".m2").join("repository"))
    }

    /// Directory whose files are the entries of a module's merged archive.
    #[must_use]
    pub fn staging_dir(&self, module: &str) -> PathBuf {
        self.build_dir().join(module).join("classes")
    }

    /// Directory holding a module's produced jars.
    #[must_use]
    pub fn libs_dir(&self, module: &str) -> PathBuf {
        self.build_dir().join(module).join("libs")
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
