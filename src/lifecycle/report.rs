//! Failure reporting.
//!
//! Load failures and hook failures never escape the router. They are handed
//! to a single `FailureReporter` instead, which the host can replace.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::error::FailureKind;
use crate::routing::RouteName;

/// Which lifecycle hook ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    Init,
    Destroy,
}

impl Hook {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hook::Init => "on_init",
            Hook::Destroy => "on_destroy",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure the router absorbed.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// A fragment could not be loaded. `terminal` is set when no fallback remains.
    Load {
        route: RouteName,
        kind: FailureKind,
        message: String,
        terminal: bool,
    },

    /// A lifecycle hook returned an error or panicked.
    Hook {
        route: RouteName,
        hook: Hook,
        message: String,
    },
}

impl Failure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::Load { kind, .. } => *kind,
            Failure::Hook { .. } => FailureKind::LifecycleHookFailure,
        }
    }

    pub fn route(&self) -> &RouteName {
        match self {
            Failure::Load { route, .. } | Failure::Hook { route, .. } => route,
        }
    }
}

/// Receives every failure the router absorbs.
pub trait FailureReporter: Send + Sync {
    fn report(&self, failure: &Failure);
}

/// Logs failures through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, failure: &Failure) {
        match failure {
            Failure::Load {
                route,
                kind,
                message,
                terminal: true,
            } => {
                tracing::error!(route = %route, kind = kind.as_str(), error = %message, "Not-found fragment failed to load, giving up");
            }
            Failure::Load { route, kind, message, .. } => {
                tracing::error!(route = %route, kind = kind.as_str(), error = %message, "Fragment failed to load");
            }
            Failure::Hook { route, hook, message } => {
                tracing::warn!(route = %route, hook = %hook, error = %message, "Lifecycle hook failed");
            }
        }
    }
}

/// Keeps every reported failure, then forwards it to tracing.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    failures: Mutex<Vec<Failure>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<Failure> {
        self.failures.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.failures.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FailureReporter for CollectingReporter {
    fn report(&self, failure: &Failure) {
        TracingReporter.report(failure);
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(failure.clone());
    }
}
