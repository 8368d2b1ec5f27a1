// shade-rs: Multi-Module Packaging Coordinator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            ShadeError (~24 bytes)
//!                    |
//!     +--------+-----+------+--------+
//!     |        |            |        |
//!     v        v            v        v
//!   Config  Publish     Pipeline  Io/Other
//!    Box      Box          Box     Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config    MissingField, InvalidValue, InvalidPattern,
//!             UnknownDependency, DependencyCycle, ReadError, ParseError
//!   Publish   DuplicatePublication, ArtifactNotReady,
//!             StepFailed, InstallFailed
//!   Pipeline  DependencyFailed, Cancelled, WorkerFailed
//!
//! All variants boxed => ShadeError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ShadeError`].
pub type ShadeResult<T> = std::result::Result<T, ShadeError>;

/// Top-level error for one module's configuration.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum ShadeError {
    /// Module or configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Artifact or publication error.
    #[error("publish error: {0}")]
    Publish(#[from] Box<PublishError>),

    /// Scheduling error.
    #[error("pipeline error: {0}")]
    Pipeline(#[from] Box<PipelineError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl ShadeError {
    /// Create a [`ShadeError::Other`] from any displayable message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }

    /// Returns the configuration error, if this is one.
    #[must_use]
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Self::Config(err) => Some(&**err),
            _ => None,
        }
    }

    /// Returns the publication error, if this is one.
    #[must_use]
    pub fn as_publish(&self) -> Option<&PublishError> {
        match self {
            Self::Publish(err) => Some(&**err),
            _ => None,
        }
    }

    /// Returns the pipeline error, if this is one.
    #[must_use]
    pub fn as_pipeline(&self) -> Option<&PipelineError> {
        match self {
            Self::Pipeline(err) => Some(&**err),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ShadeError {
                fn from(err: $error) -> Self {
                    ShadeError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    PublishError => Publish,
    PipelineError => Pipeline,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration and module-table errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required module field is empty.
    #[error("module '{module}' has an empty '{field}'")]
    MissingField { module: String, field: &'static str },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Exclusion or selection pattern that is not a valid glob.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A module depends on a module missing from the table.
    #[error("module '{module}' depends on unknown module '{dependency}'")]
    UnknownDependency { module: String, dependency: String },

    /// Module dependencies form a cycle.
    #[error("dependency cycle between modules: {}", .modules.join(" -> "))]
    DependencyCycle { modules: Vec<String> },

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },
}

// --- Publish Errors ---

/// Artifact and publication errors.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A publication with this id is already registered.
    #[error("publication '{id}' is already registered")]
    DuplicatePublication { id: String },

    /// A referenced artifact was never produced.
    #[error("artifact '{classifier}' of module '{module}' is not ready")]
    ArtifactNotReady { module: String, classifier: String },

    /// The packaging step for an artifact failed.
    #[error("step '{step}' failed: {message}")]
    StepFailed { step: String, message: String },

    /// Writing into a repository failed.
    #[error("failed to install '{path}': {source}")]
    InstallFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Pipeline Errors ---

/// Module scheduling errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A module this one depends on failed.
    #[error("module '{module}' skipped because dependency '{dependency}' failed")]
    DependencyFailed { module: String, dependency: String },

    /// The run was interrupted before the module was configured.
    #[error("module '{0}' was cancelled")]
    Cancelled(String),

    /// The worker configuring the module panicked or was aborted.
    #[error("worker for module '{module}' stopped: {message}")]
    WorkerFailed { module: String, message: String },
}

#[cfg(test)]
mod tests;
