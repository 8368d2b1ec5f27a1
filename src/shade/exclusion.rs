// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exclusion policies for merged archives.
//!
//! ```text
//! "com/google/"     prefix  -> com/google/gson/Gson.class
//! "*exclude.jar"    glob    -> libs/api-exclude.jar (file name match)
//! "META-INF/*.SF"   glob    -> META-INF/SIGNER.SF   (full path match)
//! ```

use std::collections::BTreeSet;
use std::sync::LazyLock;

use serde::Serialize;
use wax::{Glob, Program};

use crate::error::ConfigError;

/// Paths never embedded in a merged archive: the server API, libraries the
/// server ships itself, and their Maven metadata.
pub const STANDARD_EXCLUSIONS: &[&str] = &[
    "*exclude.jar",
    "com/github/angeschossen/",
    "org/spigotmc/",
    "org/bukkit/",
    "org/yaml/snakeyaml/",
    "com/google/",
    "net/md_5/bungee/",
    "org/apache/commons/",
    "mojang-translations/",
    "javax/annotation/",
    "org/joml/",
    "org/checkerframework/",
    "META-INF/proguard/",
    "META-INF/versions/",
    "META-INF/maven/com.google.code.findbugs/",
    "META-INF/maven/com.google.code.gson/",
    "META-INF/maven/com.google.errorprone/",
    "META-INF/maven/com.google.guava/",
    "META-INF/maven/net.md-5/",
    "META-INF/maven/org.joml/",
    "META-INF/maven/org.spigotmc/",
    "META-INF/maven/org.yaml/",
];

static STANDARD: LazyLock<ExclusionPolicy> = LazyLock::new(|| ExclusionPolicy {
    patterns: STANDARD_EXCLUSIONS
        .iter()
        .map(|p| ExclusionPattern::classify(p))
        .collect(),
});

/// One exclusion pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "pattern", rename_all = "lowercase")]
pub enum ExclusionPattern {
    /// Trailing `/`: everything below this directory.
    Prefix(String),
    /// Anything else: a glob over the entry path (or file name when the
    /// pattern has no `/`).
    Glob(String),
}

impl ExclusionPattern {
    fn classify(raw: &str) -> Self {
        if raw.ends_with('/') {
            Self::Prefix(raw.to_string())
        } else {
            Self::Glob(raw.to_string())
        }
    }

    /// Parses and validates a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for an empty pattern or an
    /// invalid glob.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::InvalidPattern {
                pattern: raw.to_string(),
                message: "empty pattern".to_string(),
            });
        }
        let pattern = Self::classify(raw);
        if let Self::Glob(glob) = &pattern {
            compile(glob)?;
        }
        Ok(pattern)
    }

    /// The pattern as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Prefix(p) | Self::Glob(p) => p,
        }
    }
}

fn compile(pattern: &str) -> Result<Glob<'_>, ConfigError> {
    Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// A compiled pattern, borrowed from its policy for one matching pass.
enum Matcher<'p> {
    Prefix(&'p str),
    Path(Glob<'p>),
    FileName(Glob<'p>),
}

impl Matcher<'_> {
    fn matches(&self, entry: &str) -> bool {
        match self {
            Self::Prefix(prefix) => entry.starts_with(prefix),
            Self::Path(glob) => glob.is_match(entry),
            Self::FileName(glob) => {
                let file_name = entry.rsplit('/').next().unwrap_or(entry);
                glob.is_match(file_name) || glob.is_match(entry)
            }
        }
    }
}

/// Ordered set of exclusion patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExclusionPolicy {
    patterns: Vec<ExclusionPattern>,
}

impl ExclusionPolicy {
    /// The process-wide standard policy.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Builds a policy; duplicates are dropped, first occurrence kept.
    ///
    /// # Errors
    ///
    /// Returns the first invalid pattern.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::default().with_extra(patterns)
    }

    /// Returns a copy of this policy with more patterns appended.
    ///
    /// # Errors
    ///
    /// Returns the first invalid pattern.
    pub fn with_extra<I, S>(&self, patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = self.clone();
        for raw in patterns {
            let pattern = ExclusionPattern::parse(raw.as_ref())?;
            if !policy.patterns.contains(&pattern) {
                policy.patterns.push(pattern);
            }
        }
        Ok(policy)
    }

    /// Patterns in the order they were added.
    #[must_use]
    pub fn patterns(&self) -> &[ExclusionPattern] {
        &self.patterns
    }

    /// Number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the policy has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The entries of `entries` matched by at least one pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if a glob fails to compile.
    pub fn matching<'e>(
        &self,
        entries: impl IntoIterator<Item = &'e str>,
    ) -> Result<BTreeSet<String>, ConfigError> {
        let matchers = self
            .patterns
            .iter()
            .map(|pattern| {
                Ok(match pattern {
                    ExclusionPattern::Prefix(prefix) => Matcher::Prefix(prefix),
                    ExclusionPattern::Glob(glob) if glob.contains('/') => {
                        Matcher::Path(compile(glob)?)
                    }
                    ExclusionPattern::Glob(glob) => Matcher::FileName(compile(glob)?),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(entries
            .into_iter()
            .filter(|entry| matchers.iter().any(|m| m.matches(entry)))
            .map(str::to_string)
            .collect())
    }
}
