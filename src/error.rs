//! Error taxonomy for fragment loading and lifecycle hooks.
//!
//! # Failure Kinds
//! - NetworkFailure: markup or style fetch returned a non-success status
//!   (or never produced a response at all)
//! - ModuleResolutionFailure: the behavior module could not be obtained
//! - LifecycleHookFailure: `on_init` / `on_destroy` failed while running
//!
//! Load failures abort the attempt and trigger the not-found fallback.
//! Hook failures are reported and never propagated.

use std::fmt;

use thiserror::Error;

use crate::routing::FragmentId;

/// Which artifact of a fragment a fetch was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Markup,
    Style,
    Behavior,
}

impl Artifact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Artifact::Markup => "markup",
            Artifact::Style => "style",
            Artifact::Behavior => "behavior",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a fragment load attempt.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("failed to load {artifact} from {url}: status {status}")]
    Status {
        artifact: Artifact,
        url: String,
        status: u16,
    },

    /// The request never produced a response (connect error, timeout, body read).
    #[error("failed to load {artifact} from {url}: {reason}")]
    Transport {
        artifact: Artifact,
        url: String,
        reason: String,
    },

    /// The artifact location could not be derived from the base URL.
    #[error("invalid {artifact} location for fragment {fragment}: {reason}")]
    InvalidUrl {
        artifact: Artifact,
        fragment: FragmentId,
        reason: String,
    },

    /// No behavior module could be produced for the fragment.
    #[error("behavior module for fragment {fragment} unavailable: {reason}")]
    ModuleResolution { fragment: FragmentId, reason: String },
}

impl LoadError {
    /// Classify this error into the failure taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            LoadError::ModuleResolution { .. } => FailureKind::ModuleResolutionFailure,
            LoadError::Status { .. } | LoadError::Transport { .. } | LoadError::InvalidUrl { .. } => {
                FailureKind::NetworkFailure
            }
        }
    }
}

/// A failure raised by a fragment lifecycle hook.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Coarse failure classes used for logging and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    NetworkFailure,
    ModuleResolutionFailure,
    LifecycleHookFailure,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NetworkFailure => "network",
            FailureKind::ModuleResolutionFailure => "module_resolution",
            FailureKind::LifecycleHookFailure => "lifecycle_hook",
        }
    }
}

/// Result type for fragment loads.
pub type LoadResult<T> = Result<T, LoadError>;
