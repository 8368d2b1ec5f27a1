// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities.
//!
//! ```text
//! walk:  archive_entries()  ignore::Walk over a staging directory
//!        WalkOptions        max_depth, hidden, gitignore, skip_dirs
//! ```

pub mod walk;

#[cfg(test)]
mod tests;
