// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use super::order::{dependency_waves, validate_dependencies, with_dependencies};
use super::registry::ModuleRegistry;
use super::{Module, ModuleSpec};
use crate::config::types::Aliases;
use crate::error::ConfigError;

fn module(name: &str) -> Module {
    Module::builder()
        .name(name)
        .group("org.broken.arrow.library")
        .version("1.0-SNAPSHOT")
        .build()
}

fn spec(name: &str, deps: &[&str]) -> ModuleSpec {
    ModuleSpec::new(module(name)).with_dependencies(deps.iter().copied())
}

// =============================================================================
// Module
// =============================================================================

#[test]
fn test_module_id_display() {
    let m = Module::builder()
        .name("widgets")
        .group("org.example")
        .version("2.3.0")
        .build();
    assert_eq!(m.id().to_string(), "org.example:widgets");
    assert_eq!(m.description(), "");
}

#[test]
fn test_module_set_version_keeps_identity() {
    let mut m = module("nbt");
    let id = m.id();
    m.set_version("0.107");
    assert_eq!(m.version(), "0.107");
    assert_eq!(m.id(), id);
}

#[test]
fn test_module_validate_reports_first_blank_field() {
    let blank_version = Module::builder()
        .name("nbt")
        .group("org.example")
        .version("  ")
        .build();
    assert!(matches!(
        blank_version.validate(),
        Err(ConfigError::MissingField { field: "version", ref module }) if module == "nbt"
    ));

    let blank_name = Module::builder()
        .name("")
        .group("org.example")
        .version("1.0")
        .build();
    assert!(matches!(
        blank_name.validate(),
        Err(ConfigError::MissingField { field: "name", ref module }) if module == "<unnamed>"
    ));
}

// =============================================================================
// Registry
// =============================================================================

fn create_test_registry() -> ModuleRegistry {
    let mut aliases: Aliases = BTreeMap::new();
    aliases.insert(
        "menus".to_string(),
        vec!["menu-library".to_string(), "menu-configuration-manager".to_string()],
    );
    aliases.insert(
        "core".to_string(),
        vec!["menus".to_string(), "nbt".to_string()],
    );
    aliases.insert("loop".to_string(), vec!["loop".to_string(), "nbt".to_string()]);

    let mut registry = ModuleRegistry::new(aliases);
    registry.register_all([
        "menu-library",
        "menu-configuration-manager",
        "nbt",
        "database",
        "commands",
    ]);
    registry
}

#[test]
fn test_registry_resolves_nested_aliases() {
    let registry = create_test_registry();
    let resolved = registry.resolve(&["core".to_string()]).unwrap();
    assert_eq!(
        resolved,
        ["menu-library", "menu-configuration-manager", "nbt"]
    );
}

#[test]
fn test_registry_recursive_alias_is_expanded_once() {
    let registry = create_test_registry();
    let expanded = registry.resolve_aliases(&["loop".to_string()]);
    assert_eq!(expanded, ["nbt"]);
}

#[test]
fn test_registry_glob_and_dedupe() {
    let registry = create_test_registry();
    let resolved = registry
        .resolve(&["menu-*".to_string(), "menus".to_string(), "nbt".to_string()])
        .unwrap();
    assert_eq!(
        resolved,
        ["menu-configuration-manager", "menu-library", "nbt"]
    );
}

#[test]
fn test_registry_empty_selection_selects_all() {
    let registry = create_test_registry();
    let resolved = registry.resolve(&[]).unwrap();
    assert_eq!(resolved.len(), 5);
}

#[test]
fn test_registry_invalid_glob() {
    let registry = create_test_registry();
    let err = registry.match_pattern("menu-[").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { .. }));
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_dependency_waves() {
    let table = vec![
        spec("utility-library", &["menu-library", "nbt", "database"]),
        spec("menu-library", &["item-creator"]),
        spec("item-creator", &[]),
        spec("nbt", &[]),
        spec("database", &[]),
    ];
    let waves = dependency_waves(&table).unwrap();
    assert_eq!(
        waves,
        vec![
            vec!["database", "item-creator", "nbt"],
            vec!["menu-library"],
            vec!["utility-library"],
        ]
    );
}

#[test]
fn test_dependency_waves_ignore_unselected() {
    let selected = vec![spec("menu-library", &["item-creator"])];
    let waves = dependency_waves(&selected).unwrap();
    assert_eq!(waves, vec![vec!["menu-library"]]);
}

#[test]
fn test_dependency_cycle_detected() {
    let table = vec![
        spec("a", &["b"]),
        spec("b", &["c"]),
        spec("c", &["a"]),
        spec("d", &[]),
    ];
    let err = validate_dependencies(&table).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"dependency cycle between modules: a -> b -> c -> a");
}

#[test]
fn test_unknown_dependency() {
    let table = vec![spec("commands", &["localization"])];
    let err = validate_dependencies(&table).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnknownDependency { ref module, ref dependency }
            if module == "commands" && dependency == "localization"
    ));
}

#[test]
fn test_with_dependencies_adds_transitive_closure() {
    let table = [
        spec("database", &[]),
        spec("item-creator", &[]),
        spec("menu-library", &["item-creator"]),
        spec("nbt", &[]),
        spec("utility-library", &["menu-library", "nbt"]),
    ];
    assert_eq!(
        with_dependencies(&table, &["utility-library".to_string()]),
        ["item-creator", "menu-library", "nbt", "utility-library"]
    );
    assert_eq!(with_dependencies(&table, &["nbt".to_string()]), ["nbt"]);
    assert!(with_dependencies(&table, &["ghost".to_string()]).is_empty());
}
