// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module selection by name, glob or alias.
//!
//! ```text
//! input ["core", "menu-*"]
//!   resolve_aliases: "core"   --> [database, nbt, ...]
//!   match_pattern:   "menu-*" --> [menu-library, menu-configuration-manager]
//!   dedupe + preserve order
//! ```

use std::collections::BTreeSet;

use wax::{Glob, Program};

use crate::config::types::Aliases;
use crate::error::ConfigError;

/// Registry of known module names plus selection aliases.
pub struct ModuleRegistry {
    names: BTreeSet<String>,
    aliases: Aliases,
}

impl ModuleRegistry {
    /// Creates an empty registry with the given aliases.
    #[must_use]
    pub const fn new(aliases: Aliases) -> Self {
        Self {
            names: BTreeSet::new(),
            aliases,
        }
    }

    /// Registers a module name.
    pub fn register(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Registers several module names.
    pub fn register_all(&mut self, names: impl IntoIterator<Item = impl Into<String>>) {
        self.names.extend(names.into_iter().map(Into::into));
    }

    /// Every registered module name, sorted.
    #[must_use]
    pub const fn all_modules(&self) -> &BTreeSet<String> {
        &self.names
    }

    /// Expands aliases, recursively. Unknown names pass through unchanged.
    ///
    /// An alias that (directly or indirectly) names itself is expanded once.
    #[must_use]
    pub fn resolve_aliases(&self, patterns: &[String]) -> Vec<String> {
        let mut result = Vec::new();
        let mut expanding = Vec::new();
        self.expand_into(patterns, &mut expanding, &mut result);
        result
    }

    fn expand_into<'a>(
        &'a self,
        patterns: &'a [String],
        expanding: &mut Vec<&'a str>,
        out: &mut Vec<String>,
    ) {
        for pattern in patterns {
            match self.aliases.get(pattern) {
                Some(targets) if !expanding.contains(&pattern.as_str()) => {
                    expanding.push(pattern);
                    self.expand_into(targets, expanding, out);
                    expanding.pop();
                }
                Some(_) => {
                    tracing::warn!(alias = %pattern, "Recursive alias ignored");
                }
                None => out.push(pattern.clone()),
            }
        }
    }

    /// Matches one name or glob against the registered modules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the pattern is not a valid glob.
    pub fn match_pattern(&self, pattern: &str) -> Result<Vec<String>, ConfigError> {
        if self.names.contains(pattern) {
            return Ok(vec![pattern.to_string()]);
        }

        let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(self
            .names
            .iter()
            .filter(|name| glob.is_match(name.as_str()))
            .cloned()
            .collect())
    }

    /// Resolves selection patterns to concrete module names.
    ///
    /// An empty selection selects every module.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is an invalid glob.
    pub fn resolve(&self, specs: &[String]) -> Result<Vec<String>, ConfigError> {
        if specs.is_empty() {
            return Ok(self.names.iter().cloned().collect());
        }

        let mut result = Vec::new();
        let mut seen = BTreeSet::new();

        for pattern in &self.resolve_aliases(specs) {
            let matches = self.match_pattern(pattern)?;
            if matches.is_empty() {
                tracing::warn!(pattern = %pattern, "Pattern matched no modules");
            }
            for name in matches {
                if seen.insert(name.clone()) {
                    result.push(name);
                }
            }
        }

        Ok(result)
    }
}
