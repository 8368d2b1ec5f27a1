// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, PipelineError, PublishError, ShadeError, ShadeResult};

#[test]
fn test_missing_field_display() {
    let err = ConfigError::MissingField {
        module: "widgets".to_string(),
        field: "version",
    };
    insta::assert_snapshot!(err.to_string(), @"module 'widgets' has an empty 'version'");
}

#[test]
fn test_dependency_cycle_display() {
    let err = ConfigError::DependencyCycle {
        modules: vec!["a".to_string(), "b".to_string(), "a".to_string()],
    };
    insta::assert_snapshot!(err.to_string(), @"dependency cycle between modules: a -> b -> a");
}

#[test]
fn test_duplicate_publication_wraps() {
    let err: ShadeError = PublishError::DuplicatePublication {
        id: "mavenJava".to_string(),
    }
    .into();
    insta::assert_snapshot!(
        err.to_string(),
        @"publish error: publication 'mavenJava' is already registered"
    );
    assert!(matches!(
        err.as_publish(),
        Some(PublishError::DuplicatePublication { .. })
    ));
    assert!(err.as_config().is_none());
}

#[test]
fn test_pipeline_error_accessor() {
    let err: ShadeError = PipelineError::Cancelled("nbt".to_string()).into();
    assert!(matches!(err.as_pipeline(), Some(PipelineError::Cancelled(name)) if name == "nbt"));
}

#[test]
fn test_shade_error_size() {
    // Box<str> variants are 16 bytes (fat pointer), plus discriminant
    let size = std::mem::size_of::<ShadeError>();
    assert!(size <= 24, "ShadeError is {size} bytes, expected <= 24");
}

#[test]
fn test_shade_result_size() {
    let size = std::mem::size_of::<ShadeResult<()>>();
    assert!(size <= 24, "ShadeResult<()> is {size} bytes, expected <= 24");
}
