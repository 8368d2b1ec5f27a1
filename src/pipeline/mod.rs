// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-module configuration pipeline.
//!
//! # Architecture
//!
//! ```text
//! PipelineRunner (waves, semaphore, cancel token)
//!      |
//!      v  spawn_blocking per module
//! BuildContext::configure_module(spec, producer)
//!      |
//!      +--> RepositoryResolver      ordered repositories
//!      +--> ShadeCoordinator        archive name, exclusions, relocations
//!      +--> PublicationCoordinator  artifacts (via ArtifactProducer),
//!      |                            descriptor
//!      +--> LocalRepository         install (publish only)
//!      v
//! ModulePlan
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`BuildContext`] | Owns the registries and shared configuration of a run |
//! | [`ArtifactProducer`] | Packaging step behind `ensure_artifact` |
//! | [`ModulePlan`] | Everything configured for one module |
//! | [`runner::PipelineRunner`] | Schedules modules, isolates failures |

pub mod runner;


use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::config::paths::PathsConfig;
use crate::error::{PipelineError, Result, ShadeError, ShadeResult};
use crate::logging::LogContext;
use crate::module::{Module, ModuleId, ModuleSpec};
use crate::publish::artifact::{ArtifactRegistry, Classifier, file_name};
use crate::publish::descriptor::{PomDependency, PublicationDescriptor, PublicationRegistry};
use crate::publish::local::{InstallReport, LocalRepository};
use crate::publish::{PublicationCoordinator, PublishTargets, standard_artifacts};
use crate::repository::{Repository, RepositoryResolver};
use crate::shade::exclusion::ExclusionPolicy;
use crate::shade::{ShadeCoordinator, ShadePlan};
use crate::utility::fs::walk::{WalkOptions, archive_entries};

/// The packaging step that produces one artifact file.
pub trait ArtifactProducer: Send + Sync {
    /// Produces the artifact and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails; the artifact is then not
    /// registered.
    fn produce(&self, module: &Module, classifier: Option<&Classifier>, step: &str)
    -> Result<PathBuf>;
}

/// Points every artifact at its expected location in the module's `libs`
/// directory, without touching the filesystem.
#[derive(Debug, Clone)]
pub struct LibsDirProducer {
    paths: PathsConfig,
}

impl LibsDirProducer {
    /// Creates a producer over the configured build directory.
    #[must_use]
    pub const fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }
}

impl ArtifactProducer for LibsDirProducer {
    fn produce(
        &self,
        module: &Module,
        classifier: Option<&Classifier>,
        step: &str,
    ) -> Result<PathBuf> {
        let path = self
            .paths
            .libs_dir(module.name())
            .join(file_name(module, classifier));
        debug!(step, path = %path.display(), "Artifact location");
        Ok(path)
    }
}

/// Everything configured for one module.
#[derive(Debug, Clone, Serialize)]
pub struct ModulePlan {
    pub module: ModuleId,
    pub version: String,
    pub repositories: Vec<Repository>,
    pub shade: ShadePlan,
    pub publication: PublicationDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallReport>,
}

/// Shared state of one run. Registries live here, not in globals.
pub struct BuildContext {
    config: Arc<Config>,
    resolver: RepositoryResolver,
    exclusions: &'static ExclusionPolicy,
    artifacts: ArtifactRegistry,
    publications: PublicationRegistry,
    targets: PublishTargets,
    dry_run: bool,
    install: bool,
    cancel_token: CancellationToken,
}

impl BuildContext {
    /// Creates a context with fresh registries; dry-run follows `global.dry`.
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        let resolver = RepositoryResolver::new(
            &config.repositories,
            &config.paths.local_repository_dir(),
        );
        Self {
            dry_run: config.global.dry,
            config,
            resolver,
            exclusions: ExclusionPolicy::standard(),
            artifacts: ArtifactRegistry::new(),
            publications: PublicationRegistry::new(),
            targets: PublishTargets::default(),
            install: false,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sets dry-run mode (overrides `global.dry`).
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Installs every publication into the local repository.
    #[must_use]
    pub const fn with_install(mut self, install: bool) -> Self {
        self.install = install;
        self
    }

    /// Sets the repositories publications are appointed to.
    #[must_use]
    pub const fn with_targets(mut self, targets: PublishTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Uses `token` for cancellation, e.g. one shared with a signal handler.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Configuration of the run.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Repository resolver shared by every module.
    #[must_use]
    pub const fn resolver(&self) -> &RepositoryResolver {
        &self.resolver
    }

    /// Artifacts registered so far.
    #[must_use]
    pub const fn artifacts(&self) -> &ArtifactRegistry {
        &self.artifacts
    }

    /// Publications registered so far.
    #[must_use]
    pub const fn publications(&self) -> &PublicationRegistry {
        &self.publications
    }

    /// Whether repository writes are only logged.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Token cancelling every pending module.
    #[must_use]
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Whether the run was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// The publication coordinator over this run's registries.
    #[must_use]
    pub fn publication_coordinator(&self) -> PublicationCoordinator<'_> {
        PublicationCoordinator::new(
            &self.config.publication,
            &self.artifacts,
            &self.publications,
            Repository::local(&self.config.paths.local_repository_dir()),
        )
        .with_targets(self.targets)
    }

    /// Configures one module: repositories, shaded archive, artifacts,
    /// publication and, if enabled, local install.
    ///
    /// # Errors
    ///
    /// Returns the first error of any step; other modules are unaffected.
    pub fn configure_module(
        &self,
        spec: &ModuleSpec,
        producer: &dyn ArtifactProducer,
    ) -> ShadeResult<ModulePlan> {
        let module = &spec.module;
        let mut log = LogContext::with_module(module.name());
        module.validate()?;

        log.set_step("repositories");
        self.check_cancelled(module)?;
        let repositories = self.resolver.resolve_repositories().to_vec();
        debug!(count = repositories.len(), "{}Resolved repositories", log.prefix());

        log.set_step("shade");
        self.check_cancelled(module)?;
        let entries = self.staged_entries(module.name())?;
        let shade = ShadeCoordinator::new(self.exclusions).plan(
            module,
            &spec.relocations,
            &spec.exclusions,
            entries,
        )?;
        info!(
            archive = %shade.archive_name,
            excluded = shade.excluded.len(),
            relocations = shade.relocations.len(),
            "{}Planned archive",
            log.prefix()
        );

        log.set_step("publish");
        self.check_cancelled(module)?;
        let coordinator = self.publication_coordinator();
        let keys = standard_artifacts(module);
        for key in &keys {
            coordinator.ensure_artifact(module, key.classifier.clone(), |step| {
                producer.produce(module, key.classifier.as_ref(), step)
            })?;
        }
        let dependencies = self.pom_dependencies(spec);
        let descriptor = coordinator.publish(module, &keys, |d| d.dependencies = dependencies)?;
        info!(id = %descriptor.id, "{}Publication ready", log.prefix());

        let install = if self.install {
            log.set_step("install");
            self.check_cancelled(module)?;
            let local = LocalRepository::new(self.config.paths.local_repository_dir(), self.dry_run);
            Some(local.install(&descriptor)?)
        } else {
            None
        };

        Ok(ModulePlan {
            module: module.id(),
            version: module.version().to_string(),
            repositories,
            shade,
            publication: (*descriptor).clone(),
            install,
        })
    }

    fn check_cancelled(&self, module: &Module) -> ShadeResult<()> {
        if self.is_cancelled() {
            return Err(PipelineError::Cancelled(module.name().to_string()).into());
        }
        Ok(())
    }

    /// Sibling modules of `spec`, at their configured coordinates.
    fn pom_dependencies(&self, spec: &ModuleSpec) -> Vec<PomDependency> {
        spec.dependencies
            .iter()
            .map(|name| {
                let sibling = self.config.module_config(name);
                PomDependency::compile(sibling.group, name.as_str(), sibling.version)
            })
            .collect()
    }

    /// Entries of the module's staging directory; none if it does not exist.
    fn staged_entries(&self, module: &str) -> ShadeResult<Vec<String>> {
        let dir = self.config.paths.staging_dir(module);
        if !dir.is_dir() {
            debug!(module, dir = %dir.display(), "No staging directory, planning without entries");
            return Ok(Vec::new());
        }
        archive_entries(&dir, &WalkOptions::for_staging())
            .map_err(|e| ShadeError::other(format!("{e:#}")))
    }
}
