// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::walk::{WalkOptions, archive_entries};
use std::fs;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn touch(root: &TempDir, path: &str) {
    let full = root.path().join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, "").unwrap();
}

#[test]
fn test_archive_entries_relative_and_sorted() {
    let temp = temp_dir();
    touch(&temp, "org/example/Widget.class");
    touch(&temp, "com/google/gson/Gson.class");
    touch(&temp, "plugin.yml");

    let entries = archive_entries(temp.path(), &WalkOptions::for_staging()).unwrap();

    assert_eq!(
        entries,
        [
            "com/google/gson/Gson.class",
            "org/example/Widget.class",
            "plugin.yml",
        ]
    );
}

#[test]
fn test_archive_entries_staging_includes_hidden() {
    let temp = temp_dir();
    touch(&temp, ".hidden/data.bin");
    touch(&temp, "a.class");

    let staged = archive_entries(temp.path(), &WalkOptions::for_staging()).unwrap();
    assert_eq!(staged, [".hidden/data.bin", "a.class"]);

    let default = archive_entries(temp.path(), &WalkOptions::default()).unwrap();
    assert_eq!(default, ["a.class"]);
}

#[test]
fn test_archive_entries_missing_root() {
    let temp = temp_dir();
    let result = archive_entries(temp.path().join("missing"), &WalkOptions::default());
    assert!(result.is_err());
}

#[test]
fn test_walk_options_defaults() {
    let options = WalkOptions::default();
    assert!(options.respect_gitignore());
    assert!(!options.include_hidden());

    let staging = WalkOptions::for_staging();
    assert!(!staging.respect_gitignore());
    assert!(staging.include_hidden());
}

#[test]
fn test_archive_entries_staging_ignores_gitignore() {
    let temp = temp_dir();
    touch(&temp, "a.class");
    touch(&temp, "b.class");
    fs::write(temp.path().join(".ignore"), "b.class\n").unwrap();

    let staged = archive_entries(temp.path(), &WalkOptions::for_staging()).unwrap();
    assert_eq!(staged, [".ignore", "a.class", "b.class"]);
}
