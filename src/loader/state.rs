//! Per-route load state.
//!
//! # States
//! ```text
//! Unloaded → Loading → Cached(Inactive | Active)
//! Loading → Unloaded: fetch failed, nothing cached
//! ```
//!
//! `Loading` is derived from in-flight guards; `Cached` from the cache and
//! the current route. Several fetch sequences may be in flight for one
//! route at once; the state stays `Loading` until the last one finishes.

use dashmap::DashMap;

use crate::routing::RouteName;

/// Where a cached route stands relative to the host view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residency {
    Inactive,
    Active,
}

/// Load state of a route as seen by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteState {
    Unloaded,
    Loading,
    Cached(Residency),
}

/// Tracks fetch sequences in progress.
#[derive(Debug, Default)]
pub struct InFlight {
    routes: DashMap<RouteName, usize>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a fetch sequence for `route` as started.
    pub fn begin(&self, route: &RouteName) -> LoadingGuard<'_> {
        *self.routes.entry(route.clone()).or_default() += 1;
        LoadingGuard {
            inflight: self,
            route: route.clone(),
        }
    }

    pub fn is_loading(&self, route: &str) -> bool {
        self.routes.contains_key(route)
    }

    fn finish(&self, route: &RouteName) {
        self.routes.remove_if_mut(route, |_, count| {
            *count -= 1;
            *count == 0
        });
    }
}

/// Ends the fetch sequence when dropped, on success or failure.
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    inflight: &'a InFlight,
    route: RouteName,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.inflight.finish(&self.route);
    }
}
