// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publication descriptors and their registry.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::artifact::{Artifact, ArtifactKey};
use crate::error::PublishError;
use crate::repository::Repository;

/// A developer listed in the POM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Developer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Source control block of the POM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scm {
    pub connection: String,
    pub developer_connection: String,
    pub url: String,
}

/// Human-facing POM fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PomMetadata {
    pub name: String,
    pub description: String,
    pub url: String,
    pub developers: Vec<Developer>,
    pub scm: Scm,
}

/// A sibling module the publication depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub scope: String,
}

impl PomDependency {
    /// A `compile`-scoped dependency, as Gradle's `api` configuration
    /// publishes it.
    #[must_use]
    pub fn compile(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            scope: "compile".to_string(),
        }
    }
}

/// Everything needed to publish one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationDescriptor {
    pub id: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Artifacts to publish; the first unclassified key is the primary file.
    pub artifacts: Vec<ArtifactKey>,
    pub pom: PomMetadata,
    /// Sibling modules listed in the POM.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<PomDependency>,
    /// Repositories the publication is appointed to.
    pub targets: Vec<Repository>,
    #[serde(skip)]
    resolved: Vec<Arc<Artifact>>,
}

impl PublicationDescriptor {
    /// Creates a descriptor with no targets or resolved artifacts.
    pub(crate) fn new(
        id: String,
        group_id: String,
        artifact_id: String,
        version: String,
        artifacts: Vec<ArtifactKey>,
        pom: PomMetadata,
    ) -> Self {
        Self {
            id,
            group_id,
            artifact_id,
            version,
            artifacts,
            pom,
            dependencies: Vec::new(),
            targets: Vec::new(),
            resolved: Vec::new(),
        }
    }

    /// `group:artifact:version`.
    #[must_use]
    pub fn coordinates(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }

    /// Registered artifacts behind [`Self::artifacts`], filled in on publish.
    #[must_use]
    pub fn resolved_artifacts(&self) -> &[Arc<Artifact>] {
        &self.resolved
    }

    /// Stores the registered artifacts behind the keys.
    pub(crate) fn set_resolved(&mut self, resolved: Vec<Arc<Artifact>>) {
        self.resolved = resolved;
    }

    /// The primary (unclassified) artifact, once resolved.
    #[must_use]
    pub fn primary(&self) -> Option<&Arc<Artifact>> {
        self.resolved.iter().find(|a| a.classifier().is_none())
    }

    /// Renders the descriptor as a Maven POM.
    #[must_use]
    pub fn to_pom_xml(&self) -> String {
        let mut xml = String::new();
        let pom = &self.pom;
        let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            xml,
            r#"<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">"#
        );
        element(&mut xml, 1, "modelVersion", "4.0.0");
        element(&mut xml, 1, "groupId", &self.group_id);
        element(&mut xml, 1, "artifactId", &self.artifact_id);
        element(&mut xml, 1, "version", &self.version);
        element(&mut xml, 1, "packaging", "jar");
        element(&mut xml, 1, "name", &pom.name);
        element(&mut xml, 1, "description", &pom.description);
        if !pom.url.is_empty() {
            element(&mut xml, 1, "url", &pom.url);
        }
        if !pom.developers.is_empty() {
            let _ = writeln!(xml, "  <developers>");
            for developer in &pom.developers {
                let _ = writeln!(xml, "    <developer>");
                element(&mut xml, 3, "id", &developer.id);
                element(&mut xml, 3, "name", &developer.name);
                if !developer.email.is_empty() {
                    element(&mut xml, 3, "email", &developer.email);
                }
                let _ = writeln!(xml, "    </developer>");
            }
            let _ = writeln!(xml, "  </developers>");
        }
        if !pom.scm.url.is_empty() || !pom.scm.connection.is_empty() {
            let _ = writeln!(xml, "  <scm>");
            element(&mut xml, 2, "connection", &pom.scm.connection);
            element(&mut xml, 2, "developerConnection", &pom.scm.developer_connection);
            element(&mut xml, 2, "url", &pom.scm.url);
            let _ = writeln!(xml, "  </scm>");
        }
        if !self.dependencies.is_empty() {
            let _ = writeln!(xml, "  <dependencies>");
            for dependency in &self.dependencies {
                let _ = writeln!(xml, "    <dependency>");
                element(&mut xml, 3, "groupId", &dependency.group_id);
                element(&mut xml, 3, "artifactId", &dependency.artifact_id);
                element(&mut xml, 3, "version", &dependency.version);
                element(&mut xml, 3, "scope", &dependency.scope);
                let _ = writeln!(xml, "    </dependency>");
            }
            let _ = writeln!(xml, "  </dependencies>");
        }
        let _ = writeln!(xml, "</project>");
        xml
    }
}

fn element(xml: &mut String, depth: usize, tag: &str, value: &str) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(xml, "{indent}<{tag}>{}</{tag}>", escape_xml(value));
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Publications registered during one run, keyed by id.
#[derive(Debug, Default)]
pub struct PublicationRegistry {
    publications: Mutex<BTreeMap<String, Arc<PublicationDescriptor>>>,
}

impl PublicationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor under its id.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::DuplicatePublication`] if the id is taken.
    pub fn register(
        &self,
        descriptor: PublicationDescriptor,
    ) -> Result<Arc<PublicationDescriptor>, PublishError> {
        let mut publications = self
            .publications
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if publications.contains_key(&descriptor.id) {
            return Err(PublishError::DuplicatePublication { id: descriptor.id });
        }
        let descriptor = Arc::new(descriptor);
        publications.insert(descriptor.id.clone(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Whether a publication with `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.publications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Registered publication with `id`, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<PublicationDescriptor>> {
        self.publications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.publications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Number of registered publications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.publications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no publication is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
