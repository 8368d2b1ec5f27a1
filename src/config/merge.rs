// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module row merging.
//!
//! ```text
//! ModuleConfig + ModuleConfigOverride --> field-by-field merge
//! ```
//!
//! Only explicitly set fields (`Some`) in the override replace base values;
//! list fields are replaced as a whole, never concatenated.

use serde::{Deserialize, Serialize};

use super::types::ModuleConfig;

/// A `[modules.<name>]` row. Unset fields inherit from `[module]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleConfigOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relocations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<Vec<String>>,
}

/// Merge a module row over a base configuration.
pub(super) fn merge_module_config(
    base: &ModuleConfig,
    row: &ModuleConfigOverride,
) -> ModuleConfig {
    let pick = |value: &Option<String>, fallback: &String| {
        value.clone().unwrap_or_else(|| fallback.clone())
    };
    let pick_list = |value: &Option<Vec<String>>, fallback: &Vec<String>| {
        value.clone().unwrap_or_else(|| fallback.clone())
    };

    ModuleConfig {
        enabled: row.enabled.unwrap_or(base.enabled),
        group: pick(&row.group, &base.group),
        version: pick(&row.version, &base.version),
        description: pick(&row.description, &base.description),
        dependencies: pick_list(&row.dependencies, &base.dependencies),
        relocations: pick_list(&row.relocations, &base.relocations),
        exclusions: pick_list(&row.exclusions, &base.exclusions),
    }
}
