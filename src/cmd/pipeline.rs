// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plan and publish command implementations.
//!
//! ```text
//! patterns --> ModuleRegistry::resolve --> enabled only
//!          --> with_dependencies --> PipelineRunner::run --> report
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use tracing::{info, warn};

use crate::cli::modules::{PlanArgs, PublishArgs};
use crate::cmd::list::module_registry;
use crate::config::Config;
use crate::error::Result;
use crate::module::ModuleSpec;
use crate::module::order::with_dependencies;
use crate::pipeline::runner::{ModuleOutcome, PipelineRunner, RunReport};
use crate::pipeline::{BuildContext, LibsDirProducer};
use crate::publish::PublishTargets;

/// Modules a command runs on, in table order.
///
/// Patterns select among enabled modules; an empty selection means all of
/// them. Enabled dependencies of the selection are added.
///
/// # Errors
///
/// Returns an error if a pattern is not a valid glob.
pub fn select_modules(config: &Config, patterns: &[String]) -> Result<Vec<ModuleSpec>> {
    let registry = module_registry(config);
    let mut selected = Vec::new();
    for name in registry.resolve(patterns)? {
        if config.module_config(&name).enabled {
            selected.push(name);
        } else if !patterns.is_empty() {
            warn!(module = %name, "Module is disabled, skipping");
        }
    }

    let table = config.module_table();
    let names = with_dependencies(&table, &selected);
    Ok(table
        .into_iter()
        .filter(|spec| names.iter().any(|n| n == spec.name()))
        .filter(|spec| {
            let enabled = config.module_config(spec.name()).enabled;
            if !enabled {
                warn!(module = %spec.name(), "Dependency is disabled, skipping");
            }
            enabled
        })
        .collect())
}

/// One summary line per module.
#[must_use]
pub fn format_outcome(outcome: &ModuleOutcome) -> String {
    match &outcome.result {
        Ok(plan) => {
            let mut line = format!(
                "ok    {} {} ({} excluded, {} relocated) -> {}",
                outcome.module,
                plan.shade.archive_name,
                plan.shade.excluded.len(),
                plan.shade.relocations.len(),
                plan.publication.coordinates()
            );
            if let Some(install) = &plan.install {
                line.push_str(&format!(" [{}]", install.directory.display()));
            }
            line
        }
        Err(e) => format!("FAIL  {}: {e}", outcome.module),
    }
}

/// Renders a report as JSON: module name to plan or error message.
///
/// # Errors
///
/// Returns an error if a plan cannot be serialized.
pub fn report_json(report: &RunReport) -> Result<String> {
    let mut map = serde_json::Map::new();
    for outcome in report.outcomes() {
        let value = match &outcome.result {
            Ok(plan) => serde_json::to_value(plan)?,
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        };
        map.insert(outcome.module.clone(), value);
    }
    serde_json::to_string_pretty(&map).context("Failed to serialize report")
}

async fn run_pipeline(ctx: BuildContext, specs: Vec<ModuleSpec>) -> Result<RunReport> {
    let producer = Arc::new(LibsDirProducer::new(ctx.config().paths.clone()));
    let runner = Arc::new(PipelineRunner::new(Arc::new(ctx), producer));

    let ctrl_c = runner.interrupt_on(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, cancelling pipeline");
        } else {
            std::future::pending::<()>().await;
        }
    });

    let report = runner.run(specs).await;
    ctrl_c.abort();
    Ok(report?)
}

fn finish(report: &RunReport) -> Result<()> {
    let failed = report.failed().count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} module(s) failed", report.outcomes().len());
    }
    Ok(())
}

/// Main handler for plan command.
///
/// # Errors
///
/// Returns an error if selection fails or any module fails.
pub async fn run_plan_command(args: &PlanArgs, config: Arc<Config>) -> Result<()> {
    let specs = select_modules(&config, &args.modules)?;
    if specs.is_empty() {
        println!("No modules selected");
        return Ok(());
    }
    info!(modules = specs.len(), "Planning modules");

    let report = run_pipeline(BuildContext::new(config), specs).await?;
    if args.json {
        println!("{}", report_json(&report)?);
    } else {
        for outcome in report.outcomes() {
            println!("{}", format_outcome(outcome));
        }
    }
    finish(&report)
}

/// Main handler for publish command.
///
/// # Errors
///
/// Returns an error if selection fails or any module fails.
pub async fn run_publish_command(args: &PublishArgs, config: Arc<Config>) -> Result<()> {
    let specs = select_modules(&config, &args.modules)?;
    if specs.is_empty() {
        println!("No modules selected");
        return Ok(());
    }

    let targets = if args.local_only {
        PublishTargets::LOCAL
    } else {
        PublishTargets::default()
    };
    let dry = config.global.dry;
    info!(modules = specs.len(), dry, "Publishing modules");

    let ctx = BuildContext::new(config)
        .with_install(true)
        .with_targets(targets);
    let report = run_pipeline(ctx, specs).await?;
    for outcome in report.outcomes() {
        println!("{}", format_outcome(outcome));
    }
    finish(&report)
}
