// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifact repositories every module resolves against.
//!
//! ```text
//! built-ins (unless repositories.defaults = false)
//!   maven-central, maven-local, gradle-plugins, jitpack, codemc,
//!   spigot-snapshots, sonatype-public, sonatype-snapshots,
//!   apache-maven2, minecraft-libraries
//! + repositories.extra
//!        |
//!        v
//! dedupe by URL (first wins) --> ordered list
//! ```
//!
//! Order is a precedence hint only: the first repository hosting a
//! coordinate wins.

use std::collections::BTreeSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::types::RepositoriesConfig;
use crate::error::ConfigError;

/// Name of the filesystem-backed repository entry.
pub const LOCAL_REPOSITORY_NAME: &str = "maven-local";

/// Built-in remote repositories, in precedence order. The local repository
/// is inserted after the first entry.
pub const DEFAULT_REPOSITORIES: &[(&str, &str)] = &[
    ("maven-central", "https://repo.maven.apache.org/maven2/"),
    ("gradle-plugins", "https://plugins.gradle.org/m2/"),
    ("jitpack", "https://jitpack.io/"),
    ("codemc", "https://repo.codemc.io/repository/maven-public/"),
    (
        "spigot-snapshots",
        "https://hub.spigotmc.org/nexus/content/repositories/snapshots/",
    ),
    (
        "sonatype-public",
        "https://oss.sonatype.org/content/groups/public/",
    ),
    (
        "sonatype-snapshots",
        "https://oss.sonatype.org/content/repositories/snapshots/",
    ),
    ("apache-maven2", "https://repo.maven.apache.org/maven2/"),
    ("minecraft-libraries", "https://libraries.minecraft.net/"),
];

/// Accepted repository URL shapes.
const URL_PATTERN: &str = r"^(?:https?://[^\s/]+|file:///?)\S*$";

/// A named artifact repository endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Repository {
    pub name: String,
    pub url: String,
}

impl Repository {
    /// Creates a repository entry; the URL is checked by [`Self::validate`].
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Repository backed by a local directory.
    #[must_use]
    pub fn local(root: &Path) -> Self {
        let path = root.to_string_lossy().replace('\\', "/");
        let url = if path.starts_with('/') {
            format!("file://{path}")
        } else {
            format!("file:///{path}")
        };
        Self::new(LOCAL_REPOSITORY_NAME, url)
    }

    /// Checks the URL scheme (`http`, `https` or `file`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for any other URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "repositories".to_string(),
                key: "name".to_string(),
                message: format!("repository '{}' has an empty name", self.url),
            });
        }
        let pattern = Regex::new(URL_PATTERN).map_err(|e| ConfigError::InvalidPattern {
            pattern: URL_PATTERN.to_string(),
            message: e.to_string(),
        })?;
        if pattern.is_match(&self.url) {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                section: "repositories".to_string(),
                key: self.name.clone(),
                message: format!("'{}' is not an http(s) or file URL", self.url),
            })
        }
    }

    /// URL with a guaranteed trailing slash, used for de-duplication.
    fn normalized_url(&self) -> String {
        if self.url.ends_with('/') {
            self.url.clone()
        } else {
            format!("{}/", self.url)
        }
    }
}

/// Produces the ordered repository list shared by every module.
#[derive(Debug, Clone)]
pub struct RepositoryResolver {
    repositories: Vec<Repository>,
}

impl RepositoryResolver {
    /// Builds the list from configuration and the local repository root.
    #[must_use]
    pub fn new(config: &RepositoriesConfig, local_root: &Path) -> Self {
        let mut candidates = Vec::new();
        let mut defaults = DEFAULT_REPOSITORIES.iter();

        if config.defaults
            && let Some((name, url)) = defaults.next()
        {
            candidates.push(Repository::new(*name, *url));
        }
        candidates.push(Repository::local(local_root));
        if config.defaults {
            candidates.extend(defaults.map(|(name, url)| Repository::new(*name, *url)));
        }
        candidates.extend(config.extra.iter().cloned());

        let mut seen = BTreeSet::new();
        let repositories = candidates
            .into_iter()
            .filter(|repo| {
                let fresh = seen.insert(repo.normalized_url());
                if !fresh {
                    tracing::debug!(name = %repo.name, url = %repo.url, "Skipping duplicate repository");
                }
                fresh
            })
            .collect();

        Self { repositories }
    }

    /// The ordered repository list.
    #[must_use]
    pub fn resolve_repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Repository URLs in order.
    #[must_use]
    pub fn urls(&self) -> Vec<&str> {
        self.repositories.iter().map(|r| r.url.as_str()).collect()
    }
}

#[cfg(test)]
mod tests;
