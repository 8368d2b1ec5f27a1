// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package relocation rules.
//!
//! ```text
//! de.tr7zw.changeme.nbtapi  -->  org.broken.arrow.library.dependencies.de.tr7zw.changeme.nbtapi
//!
//! entry de/tr7zw/changeme/nbtapi/NBT.class
//!    -> org/broken/arrow/library/dependencies/de/tr7zw/changeme/nbtapi/NBT.class
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::module::Module;

use super::relocation_target;

/// Moves every class under `source` to `destination` (dotted prefixes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationRule {
    pub source: String,
    pub destination: String,
}

impl RelocationRule {
    /// Rule moving package `source` to `destination`.
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Rule moving `package` under the module's `dependencies` namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the module has no group and
    /// [`ConfigError::InvalidPattern`] for a blank package.
    pub fn for_module(module: &Module, package: &str) -> Result<Self, ConfigError> {
        module.require_group()?;
        let package = package.trim().trim_matches('.');
        if package.is_empty() {
            return Err(ConfigError::InvalidPattern {
                pattern: package.to_string(),
                message: "empty relocation package".to_string(),
            });
        }
        Ok(Self::new(package, relocation_target(module, package)))
    }

    /// Relocated path of an archive entry, or `None` if the rule does not
    /// cover it.
    #[must_use]
    pub fn apply(&self, entry: &str) -> Option<String> {
        let source = to_path(&self.source);
        let rest = entry.strip_prefix(source.as_str())?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }
        Some(format!("{}{rest}", to_path(&self.destination)))
    }
}

fn to_path(package: &str) -> String {
    package.replace('.', "/")
}
