// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Maven publications.
//!
//! ```text
//! ensure_artifact(primary)  ensure_artifact(sources)  ensure_artifact(javadoc)
//!          \                        |                        /
//!           +------------> ArtifactRegistry <---------------+
//!                                   |
//! publish(module, keys, customize)  v
//!   id = {module}_{id_suffix}    resolve keys (ArtifactNotReady)
//!   POM defaults --> customize --> artifactId == module name?
//!                                   |
//!                                   v
//!                         PublicationRegistry (DuplicatePublication)
//!                                   |
//!                      targets: maven-local [+ remote]
//! ```

pub mod artifact;
pub mod descriptor;
pub mod local;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use bitflags::bitflags;
use tracing::info;

use crate::config::types::PublicationConfig;
use crate::error::{ConfigError, PublishError, ShadeResult};
use crate::module::Module;
use crate::repository::Repository;

use artifact::{Artifact, ArtifactKey, ArtifactRegistry, Classifier};
use descriptor::{PomMetadata, PublicationDescriptor, PublicationRegistry, Scm};

bitflags! {
    /// Repositories a publication may be appointed to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PublishTargets: u8 {
        /// The filesystem-backed local repository.
        const LOCAL = 0x01;
        /// The configured remote repository, if any.
        const REMOTE = 0x02;
    }
}

impl Default for PublishTargets {
    fn default() -> Self {
        Self::all()
    }
}

/// The artifacts every module publishes: primary, sources, javadoc.
#[must_use]
pub fn standard_artifacts(module: &Module) -> Vec<ArtifactKey> {
    vec![
        ArtifactKey::primary(module.name()),
        ArtifactKey::classified(module.name(), Classifier::Sources),
        ArtifactKey::classified(module.name(), Classifier::Javadoc),
    ]
}

/// Builds and registers publications over a run's registries.
pub struct PublicationCoordinator<'a> {
    config: &'a PublicationConfig,
    artifacts: &'a ArtifactRegistry,
    publications: &'a PublicationRegistry,
    local: Repository,
    targets: PublishTargets,
}

impl<'a> PublicationCoordinator<'a> {
    /// Creates a coordinator appointing every target by default.
    #[must_use]
    pub fn new(
        config: &'a PublicationConfig,
        artifacts: &'a ArtifactRegistry,
        publications: &'a PublicationRegistry,
        local: Repository,
    ) -> Self {
        Self {
            config,
            artifacts,
            publications,
            local,
            targets: PublishTargets::default(),
        }
    }

    /// Restricts the repositories publications are appointed to.
    #[must_use]
    pub const fn with_targets(mut self, targets: PublishTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Returns the artifact for `(module, classifier)`, running `produce`
    /// only if it is not registered yet.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::StepFailed`] if `produce` fails.
    pub fn ensure_artifact<F, E>(
        &self,
        module: &Module,
        classifier: Option<Classifier>,
        produce: F,
    ) -> Result<Arc<Artifact>, PublishError>
    where
        F: FnOnce(&str) -> Result<PathBuf, E>,
        E: fmt::Display,
    {
        self.artifacts.ensure_artifact(module, classifier, produce)
    }

    /// POM fields a module gets before customization.
    #[must_use]
    pub fn pom_defaults(&self, module: &Module) -> PomMetadata {
        let description = if module.description().trim().is_empty() {
            format!("Description for {}", module.name())
        } else {
            module.description().to_string()
        };
        PomMetadata {
            name: module.name().to_string(),
            description,
            url: self.config.url.clone(),
            developers: self.config.developers.clone(),
            scm: Scm {
                connection: self.config.scm_connection(),
                developer_connection: self.config.scm_developer_connection(),
                url: self.config.url.clone(),
            },
        }
    }

    /// Builds, customizes, checks and registers the publication of `module`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingField`] for a blank name, group or version,
    ///   also when `customize` blanks one of them.
    /// - [`ConfigError::InvalidValue`] if `customize` changes the artifact id.
    /// - [`PublishError::ArtifactNotReady`] for a key with no registered artifact.
    /// - [`PublishError::DuplicatePublication`] if the id is already registered.
    pub fn publish<F>(
        &self,
        module: &Module,
        artifacts: &[ArtifactKey],
        customize: F,
    ) -> ShadeResult<Arc<PublicationDescriptor>>
    where
        F: FnOnce(&mut PublicationDescriptor),
    {
        module.validate()?;

        let mut descriptor = PublicationDescriptor::new(
            format!("{}_{}", module.name(), self.config.id_suffix),
            module.group().to_string(),
            module.name().to_string(),
            module.version().to_string(),
            artifacts.to_vec(),
            self.pom_defaults(module),
        );
        customize(&mut descriptor);

        for (field, value) in [
            ("group", &descriptor.group_id),
            ("version", &descriptor.version),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    module: module.name().to_string(),
                    field,
                }
                .into());
            }
        }
        if descriptor.artifact_id != module.name() {
            return Err(ConfigError::InvalidValue {
                section: "publication".to_string(),
                key: "artifact_id".to_string(),
                message: format!(
                    "'{}' must equal the module name '{}'",
                    descriptor.artifact_id,
                    module.name()
                ),
            }
            .into());
        }

        let resolved = descriptor
            .artifacts
            .iter()
            .map(|key| {
                self.artifacts
                    .get(key)
                    .ok_or_else(|| PublishError::ArtifactNotReady {
                        module: key.module.clone(),
                        classifier: key.classifier_label().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        descriptor.set_resolved(resolved);
        descriptor.targets = self.appointed_targets();

        let descriptor = self.publications.register(descriptor)?;
        info!(
            id = %descriptor.id,
            coordinates = %descriptor.coordinates(),
            artifacts = descriptor.artifacts.len(),
            targets = descriptor.targets.len(),
            "Registered publication"
        );
        Ok(descriptor)
    }

    fn appointed_targets(&self) -> Vec<Repository> {
        let mut targets = Vec::new();
        if self.targets.contains(PublishTargets::LOCAL) {
            targets.push(self.local.clone());
        }
        if self.targets.contains(PublishTargets::REMOTE)
            && let Some(remote) = &self.config.remote
        {
            targets.push(remote.clone());
        }
        targets
    }
}
