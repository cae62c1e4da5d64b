//! Fragment behavior modules.
//!
//! A behavior module is the per-fragment logic that runs when the fragment
//! is shown (`on_init`) and hidden (`on_destroy`). Both hooks default to
//! no-ops so fragments implement only what they need.
//!
//! Modules are produced by factories registered per fragment id; the host
//! application fills the registry before the router starts.

use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{HookError, LoadError, LoadResult};
use crate::lifecycle::dispatcher::panic_message;
use crate::routing::FragmentId;

/// Lifecycle capabilities of a fragment.
pub trait BehaviorModule: Send + Sync {
    /// Called after the fragment's markup is in the host view.
    ///
    /// `from_cache` is true when the fragment was already resident before
    /// this navigation.
    fn on_init(&self, _param: Option<&str>, _from_cache: bool) -> Result<(), HookError> {
        Ok(())
    }

    /// Called when navigating away from the fragment.
    fn on_destroy(&self) -> Result<(), HookError> {
        Ok(())
    }
}

/// A behavior with no hooks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBehavior;

impl BehaviorModule for NoopBehavior {}

/// Shared text slot written by [`StatusBehavior`].
#[derive(Debug, Default, Clone)]
pub struct StatusLine(Arc<Mutex<Option<String>>>);

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, text: String) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(text);
    }
}

/// Reports which fragment was shown, with its param and cache origin.
#[derive(Debug, Clone)]
pub struct StatusBehavior {
    label: String,
    status: StatusLine,
}

impl StatusBehavior {
    pub fn new(label: impl Into<String>, status: StatusLine) -> Self {
        Self {
            label: label.into(),
            status,
        }
    }
}

impl BehaviorModule for StatusBehavior {
    fn on_init(&self, param: Option<&str>, from_cache: bool) -> Result<(), HookError> {
        let mut text = format!("{} loaded", self.label);
        if let Some(param) = param {
            text.push_str(" | param: ");
            text.push_str(param);
        }
        if from_cache {
            text.push_str(" (cache)");
        }

        tracing::info!(status = %text, "Fragment initialized");
        self.status.set(text);
        Ok(())
    }
}

/// Produces a behavior module, or explains why it cannot.
pub type BehaviorFactory = Arc<dyn Fn() -> Result<Arc<dyn BehaviorModule>, String> + Send + Sync>;

/// Maps fragment ids to behavior factories.
#[derive(Clone, Default)]
pub struct BehaviorRegistry {
    factories: HashMap<FragmentId, BehaviorFactory>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `fragment`, replacing any previous one.
    pub fn register<F>(&mut self, fragment: impl Into<FragmentId>, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Arc<dyn BehaviorModule>, String> + Send + Sync + 'static,
    {
        self.factories.insert(fragment.into(), Arc::new(factory));
        self
    }

    /// Register a ready-made module shared by every resolution.
    pub fn register_module(&mut self, fragment: impl Into<FragmentId>, module: Arc<dyn BehaviorModule>) -> &mut Self {
        self.register(fragment, move || Ok(module.clone()))
    }

    pub fn register_noop(&mut self, fragment: impl Into<FragmentId>) -> &mut Self {
        self.register_module(fragment, Arc::new(NoopBehavior))
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.factories.contains_key(fragment)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Produce the behavior module for `fragment`.
    pub fn resolve(&self, fragment: &FragmentId) -> LoadResult<Arc<dyn BehaviorModule>> {
        let factory = self
            .factories
            .get(fragment)
            .ok_or_else(|| LoadError::ModuleResolution {
                fragment: fragment.clone(),
                reason: "no behavior registered".to_string(),
            })?;

        match catch_unwind(AssertUnwindSafe(|| factory())) {
            Ok(module) => module.map_err(|reason| LoadError::ModuleResolution {
                fragment: fragment.clone(),
                reason,
            }),
            Err(payload) => Err(LoadError::ModuleResolution {
                fragment: fragment.clone(),
                reason: format!("panicked: {}", panic_message(payload.as_ref())),
            }),
        }
    }
}

impl fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.factories.keys().collect();
        ids.sort();
        f.debug_struct("BehaviorRegistry").field("fragments", &ids).finish()
    }
}
