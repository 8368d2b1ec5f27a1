// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use ignore::WalkBuilder;
use std::path::Path;
use tracing::warn;

/// Options for directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Whether hidden files and directories are listed.
    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Whether `.gitignore` and `.ignore` files filter the walk.
    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    /// Options for a staging directory: every file is an archive entry,
    /// ignore files included.
    #[must_use]
    pub fn for_staging() -> Self {
        Self::builder()
            .with_include_hidden(true)
            .with_respect_gitignore(false)
            .build()
    }
}

/// Builds a `WalkBuilder` with the given options. Symbolic links are not
/// followed.
fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.follow_links(false);
    builder.hidden(!options.include_hidden());

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());

    builder
}

/// Lists the files below `root` as archive entry paths.
///
/// Entries are relative to `root`, `/`-separated and sorted. Unreadable
/// entries are logged and skipped.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use shade_rs::utility::fs::walk::{archive_entries, WalkOptions};
///
/// let entries = archive_entries("build/nbt/classes", &WalkOptions::for_staging())?;
/// println!("{} entries", entries.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn archive_entries<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<Vec<String>> {
    let root = root.as_ref();

    if !root.is_dir() {
        anyhow::bail!("staging directory does not exist: {}", root.display());
    }

    let mut entries = Vec::new();
    for result in build_walker(root, options).build() {
        match result {
            Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                if let Ok(relative) = entry.path().strip_prefix(root) {
                    entries.push(to_entry_path(relative));
                }
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "walk error"),
        }
    }

    entries.sort_unstable();
    Ok(entries)
}

fn to_entry_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
