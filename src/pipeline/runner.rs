// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pipeline runner for configuring many modules.
//!
//! ```text
//! PipelineRunner::new(ctx, producer)
//!   .with_concurrency(n)
//!   .run(specs).await
//!       dependency_waves(specs)
//!       per wave: JoinSet, one spawn_blocking per module,
//!                 bounded by a shared semaphore
//!       dependents of a failed module --> DependencyFailed
//! ```

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};

use crate::error::{PipelineError, ShadeError, ShadeResult};
use crate::module::ModuleSpec;
use crate::module::order::dependency_waves;

use super::{ArtifactProducer, BuildContext, ModulePlan};

/// Result of configuring one module.
#[derive(Debug)]
pub struct ModuleOutcome {
    pub module: String,
    pub result: ShadeResult<ModulePlan>,
}

impl ModuleOutcome {
    /// Whether the module was configured.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a run, in scheduling order.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<ModuleOutcome>,
}

impl RunReport {
    /// Every outcome, in scheduling order.
    #[must_use]
    pub fn outcomes(&self) -> &[ModuleOutcome] {
        &self.outcomes
    }

    /// Consumes the report, returning its outcomes.
    #[must_use]
    pub fn into_outcomes(self) -> Vec<ModuleOutcome> {
        self.outcomes
    }

    /// Outcome of one module.
    #[must_use]
    pub fn get(&self, module: &str) -> Option<&ModuleOutcome> {
        self.outcomes.iter().find(|o| o.module == module)
    }

    /// Outcomes of failed modules.
    pub fn failed(&self) -> impl Iterator<Item = &ModuleOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Outcomes of configured modules.
    pub fn succeeded(&self) -> impl Iterator<Item = &ModuleOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    /// Whether every module was configured.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(ModuleOutcome::is_success)
    }
}

/// Runs the per-module routine over a module table.
///
/// Modules of one dependency wave run concurrently; a module starts only
/// after every selected module it depends on has finished. A failure is
/// recorded for its module and never aborts siblings.
pub struct PipelineRunner {
    ctx: Arc<BuildContext>,
    producer: Arc<dyn ArtifactProducer>,
    semaphore: Arc<Semaphore>,
}

impl PipelineRunner {
    /// Creates a runner; concurrency defaults to `global.concurrency` or
    /// the number of CPU cores.
    #[must_use]
    pub fn new(ctx: Arc<BuildContext>, producer: Arc<dyn ArtifactProducer>) -> Self {
        let max_concurrent = ctx.config().global.concurrency.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(4)
        });
        Self {
            ctx,
            producer,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Sets the maximum number of modules configured at once.
    #[must_use]
    pub fn with_concurrency(mut self, max_concurrent: usize) -> Self {
        self.semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
        self
    }

    /// Context shared by every module of the run.
    #[must_use]
    pub fn context(&self) -> &Arc<BuildContext> {
        &self.ctx
    }

    /// Signals every pending module to stop.
    pub fn interrupt_all(&self) {
        tracing::info!("Interrupting pipeline");
        self.ctx.cancel_token().cancel();
    }

    /// Interrupts the run once `signal` completes, e.g. on Ctrl+C.
    ///
    /// Abort the returned handle when the run finishes first.
    pub fn interrupt_on<F>(self: &Arc<Self>, signal: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runner = Arc::clone(self);
        tokio::spawn(async move {
            signal.await;
            runner.interrupt_all();
        })
    }

    /// Configures every module of `specs`.
    ///
    /// # Errors
    ///
    /// Returns an error only if `specs` contains a dependency cycle;
    /// module failures are reported in the [`RunReport`].
    pub async fn run(&self, specs: Vec<ModuleSpec>) -> ShadeResult<RunReport> {
        let waves = dependency_waves(&specs)?;
        let mut by_name: HashMap<String, ModuleSpec> = specs
            .into_iter()
            .map(|spec| (spec.name().to_string(), spec))
            .collect();

        tracing::info!(
            modules = by_name.len(),
            waves = waves.len(),
            "Starting pipeline"
        );

        let mut report = RunReport::default();
        let mut failed: BTreeSet<String> = BTreeSet::new();

        for (index, wave) in waves.into_iter().enumerate() {
            tracing::debug!(wave = index + 1, modules = ?wave, "Starting wave");
            let mut set = JoinSet::new();
            let mut names = HashMap::new();

            for name in wave {
                let Some(spec) = by_name.remove(&name) else {
                    continue;
                };

                if let Some(dependency) = spec.dependencies.iter().find(|d| failed.contains(*d)) {
                    tracing::warn!(module = %name, dependency = %dependency, "Skipping module, dependency failed");
                    let err = PipelineError::DependencyFailed {
                        module: name.clone(),
                        dependency: dependency.clone(),
                    };
                    failed.insert(name.clone());
                    report.outcomes.push(ModuleOutcome {
                        module: name,
                        result: Err(err.into()),
                    });
                    continue;
                }

                let ctx = Arc::clone(&self.ctx);
                let producer = Arc::clone(&self.producer);
                let semaphore = Arc::clone(&self.semaphore);
                let handle = set.spawn(async move {
                    let module = spec.name().to_string();
                    let Ok(_permit) = semaphore.acquire_owned().await else {
                        return Err(ShadeError::from(PipelineError::WorkerFailed {
                            module,
                            message: "concurrency limiter closed".to_string(),
                        }));
                    };
                    match tokio::task::spawn_blocking(move || {
                        ctx.configure_module(&spec, producer.as_ref())
                    })
                    .await
                    {
                        Ok(result) => result,
                        Err(e) => Err(ShadeError::from(PipelineError::WorkerFailed {
                            module,
                            message: e.to_string(),
                        })),
                    }
                });
                names.insert(handle.id(), name);
            }

            let mut finished = Vec::new();
            while let Some(joined) = set.join_next_with_id().await {
                let (module, result) = match joined {
                    Ok((id, result)) => (names.remove(&id).unwrap_or_default(), result),
                    Err(e) => {
                        let module = names.remove(&e.id()).unwrap_or_default();
                        let err = ShadeError::from(PipelineError::WorkerFailed {
                            module: module.clone(),
                            message: e.to_string(),
                        });
                        (module, Err(err))
                    }
                };
                match &result {
                    Ok(plan) => tracing::info!(module = %module, archive = %plan.shade.archive_name, "Module configured"),
                    Err(e) => {
                        tracing::error!(module = %module, error = %e, "Module failed");
                        failed.insert(module.clone());
                    }
                }
                finished.push(ModuleOutcome { module, result });
            }
            finished.sort_by(|a, b| a.module.cmp(&b.module));
            report.outcomes.extend(finished);
        }

        tracing::info!(
            succeeded = report.succeeded().count(),
            failed = report.failed().count(),
            "Pipeline finished"
        );
        Ok(report)
    }
}
