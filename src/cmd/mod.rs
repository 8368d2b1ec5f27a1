// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), list, repos, pipeline (plan, publish)
//! ```

pub mod config;
pub mod list;
pub mod pipeline;
pub mod repos;
