// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Produced artifacts and the registry that makes their creation idempotent.
//!
//! ```text
//! ensure_artifact(module, classifier, produce)
//!        |
//!   lock registry ----- key present? --yes--> existing Arc<Artifact>
//!        | no
//!   produce() -> path   (lock held: at most one step per key)
//!        |
//!   insert Arc<Artifact> --> returned
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::error::PublishError;
use crate::module::Module;

/// Variant of a module's output; the primary artifact has none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Classifier {
    Sources,
    Javadoc,
    All,
    Named(String),
}

impl Classifier {
    /// Classifier as it appears in file names.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sources => "sources",
            Self::Javadoc => "javadoc",
            Self::All => "all",
            Self::Named(name) => name,
        }
    }

    /// Parses a classifier name; well-known names map to their variants.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "sources" => Self::Sources,
            "javadoc" => Self::Javadoc,
            "all" => Self::All,
            other => Self::Named(other.to_string()),
        }
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Classifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Registry key: `(module name, classifier)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ArtifactKey {
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<Classifier>,
}

impl ArtifactKey {
    /// Key of the primary (shaded) artifact.
    pub fn primary(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            classifier: None,
        }
    }

    /// Key of a classified artifact.
    pub fn classified(module: impl Into<String>, classifier: Classifier) -> Self {
        Self {
            module: module.into(),
            classifier: Some(classifier),
        }
    }

    /// Classifier label, `primary` for the unclassified artifact.
    #[must_use]
    pub fn classifier_label(&self) -> &str {
        self.classifier.as_ref().map_or("primary", Classifier::as_str)
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.classifier {
            Some(classifier) => write!(f, "{}:{classifier}", self.module),
            None => f.write_str(&self.module),
        }
    }
}

/// Name of the packaging step producing an artifact, e.g. `nbt_sourcesJar`.
#[must_use]
pub fn step_name(module: &str, classifier: Option<&Classifier>) -> String {
    match classifier {
        None => format!("{module}_shadowJar"),
        Some(Classifier::Sources) => format!("{module}_sourcesJar"),
        Some(Classifier::Javadoc) => format!("{module}_javadocJar"),
        Some(other) => format!("{module}_{other}Jar"),
    }
}

/// File name of an artifact: `{name}-{version}[-{classifier}].jar`.
#[must_use]
pub fn file_name(module: &Module, classifier: Option<&Classifier>) -> String {
    match classifier {
        None => format!("{}-{}.jar", module.name(), module.version()),
        Some(classifier) => format!("{}-{}-{classifier}.jar", module.name(), module.version()),
    }
}

/// A produced file. Never mutated once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    key: ArtifactKey,
    step: String,
    file: PathBuf,
}

impl Artifact {
    /// Registry key of the artifact.
    #[must_use]
    pub const fn key(&self) -> &ArtifactKey {
        &self.key
    }

    /// Name of the step that produced the file.
    #[must_use]
    pub fn step(&self) -> &str {
        &self.step
    }

    /// Produced file.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Classifier, `None` for the primary artifact.
    #[must_use]
    pub const fn classifier(&self) -> Option<&Classifier> {
        self.key.classifier.as_ref()
    }
}

/// Artifacts of one run, keyed by `(module, classifier)`.
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    artifacts: Mutex<HashMap<ArtifactKey, Arc<Artifact>>>,
}

impl ArtifactRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the artifact for `(module, classifier)`, producing it first
    /// if needed.
    ///
    /// `produce` runs at most once per key and run; the registry lock is
    /// held while it runs, so concurrent callers for the same key wait and
    /// receive the same handle.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::StepFailed`] if `produce` fails; nothing is
    /// registered in that case and a later call runs the step again.
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
        let key = ArtifactKey {
            module: module.name().to_string(),
            classifier,
        };
        let mut artifacts = self.artifacts.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = artifacts.get(&key) {
            debug!(artifact = %key, "Artifact already registered");
            return Ok(Arc::clone(existing));
        }

        let step = step_name(&key.module, key.classifier.as_ref());
        let file = produce(&step).map_err(|e| PublishError::StepFailed {
            step: step.clone(),
            message: e.to_string(),
        })?;
        info!(artifact = %key, step = %step, file = %file.display(), "Registered artifact");

        let artifact = Arc::new(Artifact { key: key.clone(), step, file });
        artifacts.insert(key, Arc::clone(&artifact));
        Ok(artifact)
    }

    /// Registered artifact for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &ArtifactKey) -> Option<Arc<Artifact>> {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Whether an artifact is registered for `key`.
    #[must_use]
    pub fn contains(&self, key: &ArtifactKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of registered artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no artifact is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
