// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        list / repos / plan / publish
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML module table, env   |
//!              '-------------+-------------'
//!                            v
//!                  pipeline (runner, waves)
//!                            |
//!          +-----------------+-----------------+
//!          v                 v                 v
//!     repository           shade            publish
//!      resolver     exclusions/relocation  artifacts, POM,
//!                                          local install
//!
//!   +-----------------------------------------+
//!   |  module   identity, selection, order    |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod module;
pub mod pipeline;
pub mod publish;
pub mod repository;
pub mod shade;
pub mod utility;
