// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::artifact::{ArtifactKey, ArtifactRegistry, Classifier, file_name, step_name};
use super::descriptor::{Developer, PomDependency, PublicationRegistry};
use super::local::LocalRepository;
use super::{PublicationCoordinator, PublishTargets, standard_artifacts};
use crate::config::types::PublicationConfig;
use crate::error::{ConfigError, PublishError};
use crate::module::Module;
use crate::repository::Repository;

fn widgets() -> Module {
    Module::builder()
        .name("widgets")
        .group("org.example")
        .version("2.3.0")
        .build()
}

fn module(name: &str) -> Module {
    Module::builder()
        .name(name)
        .group("org.example")
        .version("1.0")
        .build()
}

fn publication_config() -> PublicationConfig {
    PublicationConfig {
        url: "https://github.com/broken1arrow/Utility-Library".to_string(),
        developers: vec![Developer {
            id: "yourId".to_string(),
            name: "broken-arrow".to_string(),
            email: "not set".to_string(),
        }],
        ..PublicationConfig::default()
    }
}

struct Fixture {
    config: PublicationConfig,
    artifacts: ArtifactRegistry,
    publications: PublicationRegistry,
}

impl Fixture {
    fn new() -> Self {
        Self {
            config: publication_config(),
            artifacts: ArtifactRegistry::new(),
            publications: PublicationRegistry::new(),
        }
    }

    fn coordinator(&self) -> PublicationCoordinator<'_> {
        PublicationCoordinator::new(
            &self.config,
            &self.artifacts,
            &self.publications,
            Repository::local(std::path::Path::new("/m2")),
        )
    }

    fn produce_all(&self, module: &Module) {
        let coordinator = self.coordinator();
        for key in standard_artifacts(module) {
            let name = file_name(module, key.classifier.as_ref());
            coordinator
                .ensure_artifact(module, key.classifier, |_| {
                    Ok::<_, String>(PathBuf::from("/build").join(name))
                })
                .unwrap();
        }
    }
}

// =============================================================================
// Artifacts
// =============================================================================

#[test]
fn test_step_and_file_names() {
    let m = widgets();
    assert_eq!(step_name("widgets", None), "widgets_shadowJar");
    assert_eq!(step_name("widgets", Some(&Classifier::Sources)), "widgets_sourcesJar");
    assert_eq!(step_name("widgets", Some(&Classifier::Javadoc)), "widgets_javadocJar");
    assert_eq!(file_name(&m, None), "widgets-2.3.0.jar");
    assert_eq!(
        file_name(&m, Some(&Classifier::Sources)),
        "widgets-2.3.0-sources.jar"
    );
    assert_eq!(
        file_name(&m, Some(&Classifier::Named("dev".into()))),
        "widgets-2.3.0-dev.jar"
    );
}

#[test]
fn test_classifier_parse() {
    assert_eq!(Classifier::parse("sources"), Classifier::Sources);
    assert_eq!(Classifier::parse("all"), Classifier::All);
    assert_eq!(Classifier::parse("dev"), Classifier::Named("dev".into()));
    assert_eq!(Classifier::parse("javadoc").to_string(), "javadoc");
}

#[test]
fn test_ensure_artifact_runs_step_once() {
    let registry = ArtifactRegistry::new();
    let runs = AtomicUsize::new(0);
    let m = widgets();

    let produce = |step: &str| {
        runs.fetch_add(1, Ordering::SeqCst);
        Ok::<_, String>(PathBuf::from(format!("/build/{step}.jar")))
    };
    let first = registry
        .ensure_artifact(&m, Some(Classifier::Sources), produce)
        .unwrap();
    let second = registry
        .ensure_artifact(&m, Some(Classifier::Sources), produce)
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(first.step(), "widgets_sourcesJar");
    assert_eq!(first.file(), PathBuf::from("/build/widgets_sourcesJar.jar"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_ensure_artifact_distinct_classifiers() {
    let registry = ArtifactRegistry::new();
    let m = widgets();
    let ok = |_: &str| Ok::<_, String>(PathBuf::from("x.jar"));

    let primary = registry.ensure_artifact(&m, None, ok).unwrap();
    let javadoc = registry
        .ensure_artifact(&m, Some(Classifier::Javadoc), ok)
        .unwrap();

    assert!(!Arc::ptr_eq(&primary, &javadoc));
    assert!(registry.contains(&ArtifactKey::primary("widgets")));
    assert!(registry.contains(&ArtifactKey::classified("widgets", Classifier::Javadoc)));
}

#[test]
fn test_ensure_artifact_failure_registers_nothing() {
    let registry = ArtifactRegistry::new();
    let m = widgets();

    let err = registry
        .ensure_artifact(&m, Some(Classifier::Javadoc), |_| {
            Err::<PathBuf, _>("javadoc tool missing")
        })
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"step 'widgets_javadocJar' failed: javadoc tool missing");
    assert!(registry.is_empty());

    // retried on the next call
    registry
        .ensure_artifact(&m, Some(Classifier::Javadoc), |_| {
            Ok::<_, String>(PathBuf::from("ok.jar"))
        })
        .unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_ensure_artifact_concurrent_callers_share_step() {
    let registry = Arc::new(ArtifactRegistry::new());
    let runs = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let runs = Arc::clone(&runs);
            std::thread::spawn(move || {
                registry
                    .ensure_artifact(&widgets(), None, |_| {
                        runs.fetch_add(1, Ordering::SeqCst);
                        std::thread::sleep(std::time::Duration::from_millis(5));
                        Ok::<_, String>(PathBuf::from("widgets-2.3.0.jar"))
                    })
                    .unwrap()
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|a| Arc::ptr_eq(a, &results[0])));
}

// =============================================================================
// Publications
// =============================================================================

#[test]
fn test_publish_builds_descriptor() {
    let fixture = Fixture::new();
    let m = widgets();
    fixture.produce_all(&m);

    let descriptor = fixture
        .coordinator()
        .publish(&m, &standard_artifacts(&m), |_| {})
        .unwrap();

    assert_eq!(descriptor.id, "widgets_mavenJava");
    assert_eq!(descriptor.coordinates(), "org.example:widgets:2.3.0");
    assert_eq!(descriptor.pom.description, "Description for widgets");
    assert_eq!(
        descriptor.pom.scm.connection,
        "scm:git:git://github.com/broken1arrow/Utility-Library"
    );
    assert_eq!(descriptor.resolved_artifacts().len(), 3);
    assert_eq!(
        descriptor.primary().map(|a| a.file().to_path_buf()),
        Some(PathBuf::from("/build/widgets-2.3.0.jar"))
    );
    assert_eq!(descriptor.targets.len(), 1);
    assert_eq!(descriptor.targets[0].name, "maven-local");
    assert!(fixture.publications.contains("widgets_mavenJava"));
}

#[test]
fn test_publish_two_modules_distinct_ids() {
    let fixture = Fixture::new();
    let (a, b) = (module("nbt"), module("menu-library"));
    fixture.produce_all(&a);
    fixture.produce_all(&b);

    let coordinator = fixture.coordinator();
    coordinator.publish(&a, &standard_artifacts(&a), |_| {}).unwrap();
    coordinator.publish(&b, &standard_artifacts(&b), |_| {}).unwrap();

    assert_eq!(
        fixture.publications.ids(),
        ["menu-library_mavenJava", "nbt_mavenJava"]
    );
}

#[test]
fn test_publish_forced_duplicate_id() {
    let fixture = Fixture::new();
    let (a, b) = (module("nbt"), module("menu-library"));
    fixture.produce_all(&a);
    fixture.produce_all(&b);

    let coordinator = fixture.coordinator();
    coordinator.publish(&a, &[], |_| {}).unwrap();
    let err = coordinator
        .publish(&b, &[], |d| d.id = "nbt_mavenJava".to_string())
        .unwrap_err();

    assert!(matches!(
        err.as_publish(),
        Some(PublishError::DuplicatePublication { id }) if id == "nbt_mavenJava"
    ));
    assert_eq!(fixture.publications.len(), 1);
}

#[test]
fn test_publish_twice_is_duplicate() {
    let fixture = Fixture::new();
    let m = widgets();
    let coordinator = fixture.coordinator();
    coordinator.publish(&m, &[], |_| {}).unwrap();
    let err = coordinator.publish(&m, &[], |_| {}).unwrap_err();
    assert!(matches!(
        err.as_publish(),
        Some(PublishError::DuplicatePublication { .. })
    ));
}

#[test]
fn test_publish_missing_artifact() {
    let fixture = Fixture::new();
    let m = widgets();
    let err = fixture
        .coordinator()
        .publish(&m, &standard_artifacts(&m), |_| {})
        .unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"publish error: artifact 'primary' of module 'widgets' is not ready");
    assert!(fixture.publications.is_empty());
}

#[test]
fn test_publish_rejects_changed_artifact_id() {
    let fixture = Fixture::new();
    let m = widgets();
    let err = fixture
        .coordinator()
        .publish(&m, &[], |d| d.artifact_id = "gadgets".to_string())
        .unwrap_err();

    assert!(matches!(
        err.as_config(),
        Some(ConfigError::InvalidValue { key, .. }) if key == "artifact_id"
    ));
    assert!(fixture.publications.is_empty());
}

#[test]
fn test_publish_rejects_blanked_coordinates() {
    let fixture = Fixture::new();
    let m = widgets();
    let err = fixture
        .coordinator()
        .publish(&m, &[], |d| {
            d.version.clear();
            d.group_id.clear();
        })
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"config error: module 'widgets' has an empty 'group'");

    let err = fixture
        .coordinator()
        .publish(&m, &[], |d| d.version = "  ".to_string())
        .unwrap_err();
    assert!(matches!(
        err.as_config(),
        Some(ConfigError::MissingField { field: "version", .. })
    ));
    assert!(fixture.publications.is_empty());
}

#[test]
fn test_publish_customize_description() {
    let fixture = Fixture::new();
    let m = widgets();
    let descriptor = fixture
        .coordinator()
        .publish(&m, &[], |d| d.pom.description = "Widgets for menus".to_string())
        .unwrap();
    assert_eq!(descriptor.pom.description, "Widgets for menus");
}

#[test]
fn test_publish_requires_version() {
    let fixture = Fixture::new();
    let m = Module::builder().name("a").group("g").version("").build();
    let err = fixture.coordinator().publish(&m, &[], |_| {}).unwrap_err();
    assert!(matches!(
        err.as_config(),
        Some(ConfigError::MissingField { field: "version", .. })
    ));
}

#[test]
fn test_publish_targets() {
    let mut fixture = Fixture::new();
    fixture.config.remote = Some(Repository::new("releases", "https://repo.example.org/releases"));
    let m = widgets();

    let both = fixture.coordinator().publish(&m, &[], |_| {}).unwrap();
    assert_eq!(
        both.targets.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        ["maven-local", "releases"]
    );

    let other = module("nbt");
    let local_only = fixture
        .coordinator()
        .with_targets(PublishTargets::LOCAL)
        .publish(&other, &[], |_| {})
        .unwrap();
    assert_eq!(local_only.targets.len(), 1);
}

#[test]
fn test_pom_xml() {
    let fixture = Fixture::new();
    let m = widgets();
    let descriptor = fixture
        .coordinator()
        .publish(&m, &[], |d| {
            d.pom.description = "Menus & <things>".to_string();
            d.dependencies
                .push(PomDependency::compile("org.example", "nbt", "2.3.0"));
        })
        .unwrap();

    insta::assert_snapshot!(descriptor.to_pom_xml(), @r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">
      <modelVersion>4.0.0</modelVersion>
      <groupId>org.example</groupId>
      <artifactId>widgets</artifactId>
      <version>2.3.0</version>
      <packaging>jar</packaging>
      <name>widgets</name>
      <description>Menus &amp; &lt;things&gt;</description>
      <url>https://github.com/broken1arrow/Utility-Library</url>
      <developers>
        <developer>
          <id>yourId</id>
          <name>broken-arrow</name>
          <email>not set</email>
        </developer>
      </developers>
      <scm>
        <connection>scm:git:git://github.com/broken1arrow/Utility-Library</connection>
        <developerConnection>scm:git:ssh://github.com/broken1arrow/Utility-Library</developerConnection>
        <url>https://github.com/broken1arrow/Utility-Library</url>
      </scm>
      <dependencies>
        <dependency>
          <groupId>org.example</groupId>
          <artifactId>nbt</artifactId>
          <version>2.3.0</version>
          <scope>compile</scope>
        </dependency>
      </dependencies>
    </project>
    "#);
}

// =============================================================================
// Local repository
// =============================================================================

#[test]
fn test_local_install_layout() {
    let temp = tempfile::tempdir().unwrap();
    let build = temp.path().join("build");
    std::fs::create_dir_all(&build).unwrap();
    std::fs::write(build.join("widgets-2.3.0.jar"), "jar").unwrap();

    let fixture = Fixture::new();
    let m = widgets();
    let coordinator = fixture.coordinator();
    coordinator
        .ensure_artifact(&m, None, |_| Ok::<_, String>(build.join("widgets-2.3.0.jar")))
        .unwrap();
    coordinator
        .ensure_artifact(&m, Some(Classifier::Sources), |_| {
            Ok::<_, String>(build.join("missing-sources.jar"))
        })
        .unwrap();
    let descriptor = coordinator
        .publish(&m, &standard_artifacts(&m)[..2], |_| {})
        .unwrap();

    let repo = LocalRepository::new(temp.path().join("m2"), false);
    let report = repo.install(&descriptor).unwrap();

    let dir = temp.path().join("m2/org/example/widgets/2.3.0");
    assert_eq!(report.directory, dir);
    assert!(dir.join("widgets-2.3.0.pom").is_file());
    assert_eq!(std::fs::read_to_string(dir.join("widgets-2.3.0.jar")).unwrap(), "jar");
    assert_eq!(report.installed.len(), 2);
    assert_eq!(report.skipped, [build.join("missing-sources.jar")]);
}

#[test]
fn test_local_install_dry_run_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let fixture = Fixture::new();
    let m = widgets();
    let descriptor = fixture.coordinator().publish(&m, &[], |_| {}).unwrap();

    let repo = LocalRepository::new(temp.path().join("m2"), true);
    let report = repo.install(&descriptor).unwrap();

    assert_eq!(report.installed.len(), 1);
    assert!(!temp.path().join("m2").exists());
}
