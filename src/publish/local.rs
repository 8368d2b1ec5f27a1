// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Installing publications into a Maven-layout directory.
//!
//! ```text
//! {root}/org/example/widgets/2.3.0/
//!   widgets-2.3.0.pom            (written via temp file + rename)
//!   widgets-2.3.0.jar            (primary)
//!   widgets-2.3.0-sources.jar    (classified)
//! ```

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use super::descriptor::PublicationDescriptor;
use crate::error::PublishError;

/// A filesystem-backed Maven repository.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
    dry: bool,
}

/// Files written by one install.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub directory: PathBuf,
    pub installed: Vec<PathBuf>,
    /// Artifacts whose file did not exist yet.
    pub skipped: Vec<PathBuf>,
}

impl LocalRepository {
    /// Repository rooted at `root`; `dry` only logs writes.
    pub fn new(root: impl Into<PathBuf>, dry: bool) -> Self {
        Self {
            root: root.into(),
            dry,
        }
    }

    /// Root directory of the repository.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of one version: `{group as path}/{artifact}/{version}`.
    #[must_use]
    pub fn version_dir(&self, descriptor: &PublicationDescriptor) -> PathBuf {
        let mut dir = self.root.clone();
        dir.extend(descriptor.group_id.split('.'));
        dir.push(&descriptor.artifact_id);
        dir.push(&descriptor.version);
        dir
    }

    /// Writes the POM and copies every resolved artifact file that exists.
    ///
    /// In dry-run mode only logs what would be written.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::InstallFailed`] on any I/O failure.
    pub fn install(&self, descriptor: &PublicationDescriptor) -> Result<InstallReport, PublishError> {
        let directory = self.version_dir(descriptor);
        let base = format!("{}-{}", descriptor.artifact_id, descriptor.version);
        let mut report = InstallReport {
            directory: directory.clone(),
            ..InstallReport::default()
        };

        let pom_path = directory.join(format!("{base}.pom"));
        if self.dry {
            info!(id = %descriptor.id, path = %pom_path.display(), "[DRY] Would write POM");
        } else {
            fs::create_dir_all(&directory).map_err(|e| install_failed(&directory, e))?;
            write_atomic(&pom_path, descriptor.to_pom_xml().as_bytes())?;
        }
        report.installed.push(pom_path);

        for artifact in descriptor.resolved_artifacts() {
            let target = match artifact.classifier() {
                Some(classifier) => directory.join(format!("{base}-{classifier}.jar")),
                None => directory.join(format!("{base}.jar")),
            };
            if !artifact.file().is_file() {
                warn!(
                    artifact = %artifact.key(),
                    file = %artifact.file().display(),
                    "Artifact file not built, skipping"
                );
                report.skipped.push(artifact.file().to_path_buf());
                continue;
            }
            if self.dry {
                info!(from = %artifact.file().display(), to = %target.display(), "[DRY] Would copy artifact");
            } else {
                fs::copy(artifact.file(), &target).map_err(|e| install_failed(&target, e))?;
            }
            report.installed.push(target);
        }

        info!(
            id = %descriptor.id,
            coordinates = %descriptor.coordinates(),
            files = report.installed.len(),
            "Installed publication"
        );
        Ok(report)
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), PublishError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(|e| install_failed(path, e))?;
    file.write_all(contents).map_err(|e| install_failed(path, e))?;
    file.persist(path).map_err(|e| install_failed(path, e.error))?;
    Ok(())
}

fn install_failed(path: &Path, source: std::io::Error) -> PublishError {
    PublishError::InstallFailed {
        path: path.display().to_string(),
        source,
    }
}
