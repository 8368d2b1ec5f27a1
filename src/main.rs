// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Version | Options | Inis | List | Repos | Plan | Publish
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use shade_rs::cli::global::GlobalOptions;
use shade_rs::cli::{self, Command};
use shade_rs::cmd::config::{run_inis_command, run_options_command};
use shade_rs::cmd::list::run_list_command;
use shade_rs::cmd::pipeline::{run_plan_command, run_publish_command};
use shade_rs::cmd::repos::run_repos_command;
use shade_rs::config::Config;
use shade_rs::config::loader::ConfigLoader;
use shade_rs::logging::init_logging;
use shade_rs::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Config file picked up from the working directory when present.
const DEFAULT_CONFIG_FILE: &str = "shade.toml";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::Info);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global).map(|config| run_options_command(&config))
        }
        Some(Command::Inis) => build_config_loader(&cli.global).map(|loader| {
            run_inis_command(&loader.format_loaded_files());
        }),
        Some(Command::List(args)) => {
            load_config(&cli.global).and_then(|config| run_list_command(args, &config))
        }
        Some(Command::Repos) => load_config(&cli.global).map(|config| run_repos_command(&config)),
        Some(Command::Plan(args)) => match load_config(&cli.global) {
            Ok(config) => run_plan_command(args, Arc::new(config)).await,
            Err(e) => Err(e),
        },
        Some(Command::Publish(args)) => match load_config(&cli.global) {
            Ok(config) => run_publish_command(args, Arc::new(config)).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

/// Layers, later wins: `shade.toml`, `--ini` files, `SHADE_*` env, `-s`.
fn build_config_loader(global: &GlobalOptions) -> shade_rs::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader
        .with_env_prefix("SHADE")
        .set_overrides(&global.to_config_overrides())
}

fn load_config(global: &GlobalOptions) -> shade_rs::error::Result<Config> {
    build_config_loader(global)?.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
