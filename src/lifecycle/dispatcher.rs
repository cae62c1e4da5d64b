//! Lifecycle hook dispatch.
//!
//! # Responsibilities
//! - Run `on_destroy` for the outgoing fragment and `on_init` for the incoming one
//! - Absorb hook errors and panics, reporting them once
//!
//! # Design Decisions
//! - A failing hook never blocks or rolls back the navigation in progress
//! - Ordering (destroy before init) is the caller's contract; see the router's apply step

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::HookError;
use crate::fragment::FragmentBundle;
use crate::lifecycle::report::{Failure, FailureReporter, Hook};
use crate::observability::metrics;
use crate::routing::RouteName;

/// Invokes fragment hooks and reports their failures.
#[derive(Clone)]
pub struct LifecycleDispatcher {
    reporter: Arc<dyn FailureReporter>,
}

impl LifecycleDispatcher {
    pub fn new(reporter: Arc<dyn FailureReporter>) -> Self {
        Self { reporter }
    }

    pub fn reporter(&self) -> &Arc<dyn FailureReporter> {
        &self.reporter
    }

    /// Run the outgoing fragment's `on_destroy`. Returns false if it failed.
    pub fn destroy(&self, route: &RouteName, bundle: &FragmentBundle) -> bool {
        self.run(route, Hook::Destroy, || bundle.behavior().on_destroy())
    }

    /// Run the incoming fragment's `on_init`. Returns false if it failed.
    pub fn init(&self, route: &RouteName, bundle: &FragmentBundle, param: Option<&str>, from_cache: bool) -> bool {
        self.run(route, Hook::Init, || bundle.behavior().on_init(param, from_cache))
    }

    fn run<F>(&self, route: &RouteName, hook: Hook, f: F) -> bool
    where
        F: FnOnce() -> Result<(), HookError>,
    {
        let message = match catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(())) => return true,
            Ok(Err(err)) => err.to_string(),
            Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
        };

        metrics::record_hook_failure(hook.as_str());
        self.reporter.report(&Failure::Hook {
            route: route.clone(),
            hook,
            message,
        });
        false
    }
}

/// Text carried by a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::fragment::BehaviorModule;
    use crate::lifecycle::report::CollectingReporter;
    use crate::style::StyleCoordinator;

    struct Broken;

    impl BehaviorModule for Broken {
        fn on_init(&self, _param: Option<&str>, _from_cache: bool) -> Result<(), HookError> {
            Err(HookError::new("status element missing"))
        }

        fn on_destroy(&self) -> Result<(), HookError> {
            panic!("destroy exploded");
        }
    }

    fn bundle(behavior: Arc<dyn BehaviorModule>) -> FragmentBundle {
        let styles = StyleCoordinator::new(Arc::new(MemoryDocument::new("")));
        FragmentBundle::new("<p></p>", styles.create(""), behavior)
    }

    #[test]
    fn test_failures_are_reported_not_propagated() {
        let reporter = Arc::new(CollectingReporter::new());
        let dispatcher = LifecycleDispatcher::new(reporter.clone());
        let route = RouteName::from("broken");
        let bundle = bundle(Arc::new(Broken));

        assert!(!dispatcher.init(&route, &bundle, None, false));
        assert!(!dispatcher.destroy(&route, &bundle));

        let failures = reporter.failures();
        assert_eq!(failures.len(), 2);
        assert!(matches!(
            &failures[0],
            Failure::Hook { hook: Hook::Init, message, .. } if message == "status element missing"
        ));
        assert!(matches!(
            &failures[1],
            Failure::Hook { hook: Hook::Destroy, message, .. } if message.contains("destroy exploded")
        ));
    }

    #[test]
    fn test_default_hooks_succeed() {
        let reporter = Arc::new(CollectingReporter::new());
        let dispatcher = LifecycleDispatcher::new(reporter.clone());
        let bundle = bundle(Arc::new(crate::fragment::NoopBehavior));

        assert!(dispatcher.init(&RouteName::from("home"), &bundle, Some("1"), true));
        assert!(dispatcher.destroy(&RouteName::from("home"), &bundle));
        assert!(reporter.is_empty());
    }
}
