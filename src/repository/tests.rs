// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{Repository, RepositoryResolver};
use crate::config::types::RepositoriesConfig;

#[test]
fn test_default_repositories_order() {
    let resolver = RepositoryResolver::new(
        &RepositoriesConfig::default(),
        Path::new("/home/dev/.m2/repository"),
    );
    let names: Vec<_> = resolver
        .resolve_repositories()
        .iter()
        .map(|r| r.name.as_str())
        .collect();

    // apache-maven2 shares the Maven Central URL and is dropped
    assert_eq!(
        names,
        [
            "maven-central",
            "maven-local",
            "gradle-plugins",
            "jitpack",
            "codemc",
            "spigot-snapshots",
            "sonatype-public",
            "sonatype-snapshots",
            "minecraft-libraries",
        ]
    );
    assert_eq!(resolver.urls()[1], "file:///home/dev/.m2/repository");
}

#[test]
fn test_extra_repositories_appended_and_deduped() {
    let config = RepositoriesConfig {
        defaults: true,
        extra: vec![
            Repository::new("internal", "https://repo.example.org/maven"),
            Repository::new("central-again", "https://repo.maven.apache.org/maven2"),
        ],
    };
    let resolver = RepositoryResolver::new(&config, Path::new("/m2"));
    let urls = resolver.urls();

    assert_eq!(urls.last(), Some(&"https://repo.example.org/maven"));
    assert_eq!(
        urls.iter()
            .filter(|u| u.starts_with("https://repo.maven.apache.org"))
            .count(),
        1
    );
}

#[test]
fn test_without_defaults_keeps_local() {
    let config = RepositoriesConfig {
        defaults: false,
        extra: vec![Repository::new("internal", "https://repo.example.org/maven/")],
    };
    let resolver = RepositoryResolver::new(&config, Path::new("C:\\Users\\dev\\.m2"));
    insta::assert_snapshot!(
        resolver.urls().join("\n"),
        @r"
    file:///C:/Users/dev/.m2
    https://repo.example.org/maven/
    "
    );
}

#[test]
fn test_repository_validate() {
    assert!(Repository::new("a", "https://jitpack.io").validate().is_ok());
    assert!(Repository::new("b", "http://localhost:8081/repo").validate().is_ok());
    assert!(Repository::new("c", "file:///srv/maven").validate().is_ok());
    assert!(Repository::new("d", "ftp://example.org").validate().is_err());
    assert!(Repository::new("e", "jitpack.io").validate().is_err());
    assert!(Repository::new(" ", "https://jitpack.io").validate().is_err());
}
