//! Navigation orchestration.
//!
//! # Responsibilities
//! - Serve cache hits without network I/O
//! - Run the fetch sequence on a miss and populate the cache (write-once)
//! - Apply bundles: view, style, lifecycle, scroll
//! - Fall back to the not-found route on load failure, once
//! - Preload routes without rendering them
//!
//! # Apply Order
//! ```text
//! save outgoing scroll → replace view → activate style
//!     → outgoing on_destroy → incoming on_init → current route → restore scroll
//! ```
//!
//! # Design Decisions
//! - No cancellation: a started fetch sequence always runs to completion
//! - Concurrent loads of one route may both fetch; the first put wins and
//!   the loser applies the cached winner
//! - Locks are never held across a suspension point

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::{join, join_all};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{ConfigError, RouterConfig};
use crate::document::Document;
use crate::error::LoadResult;
use crate::fragment::{BehaviorRegistry, FragmentBundle, FragmentCache, FragmentSource, HttpFragmentSource};
use crate::lifecycle::{Failure, FailureReporter, LifecycleDispatcher, TracingReporter};
use crate::loader::fetch::FragmentLoader;
use crate::loader::state::{InFlight, Residency, RouteState};
use crate::observability::metrics;
use crate::routing::{LocationFormat, NavigationResolver, RouteName, RouteTable};
use crate::style::{StyleCoordinator, StyleId};

/// Inbound navigation triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// The page finished loading.
    Ready,
    /// Back/forward or any other external change of the navigation source.
    HistoryChanged,
    /// An internal link was clicked.
    LinkClicked { href: String },
}

/// What a navigation ended up showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The requested route is displayed.
    Applied { route: RouteName, from_cache: bool },
    /// The not-found route is displayed instead of `requested`.
    FellBack {
        requested: String,
        route: RouteName,
        from_cache: bool,
    },
    /// Even the not-found route failed to load; the view is unchanged.
    Failed { route: RouteName },
    /// There is no host view to render into.
    Skipped,
}

impl NavigationOutcome {
    /// The route now displayed, if any changed.
    pub fn route(&self) -> Option<&RouteName> {
        match self {
            NavigationOutcome::Applied { route, .. } | NavigationOutcome::FellBack { route, .. } => Some(route),
            NavigationOutcome::Failed { .. } | NavigationOutcome::Skipped => None,
        }
    }

    pub fn from_cache(&self) -> Option<bool> {
        match self {
            NavigationOutcome::Applied { from_cache, .. } | NavigationOutcome::FellBack { from_cache, .. } => {
                Some(*from_cache)
            }
            NavigationOutcome::Failed { .. } | NavigationOutcome::Skipped => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            NavigationOutcome::Applied { .. } => "applied",
            NavigationOutcome::FellBack { .. } => "fell_back",
            NavigationOutcome::Failed { .. } => "failed",
            NavigationOutcome::Skipped => "skipped",
        }
    }
}

/// Snapshot of what is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub current_route: Option<RouteName>,
    pub active_style: Option<StyleId>,
}

#[derive(Debug, Default)]
struct Current {
    route: Option<RouteName>,
}

/// Client-side navigation controller.
///
/// Owns the fragment cache and navigation state; one instance per application.
pub struct Router {
    resolver: NavigationResolver,
    document: Arc<dyn Document>,
    cache: FragmentCache,
    inflight: InFlight,
    styles: Arc<StyleCoordinator>,
    lifecycle: LifecycleDispatcher,
    loader: FragmentLoader,
    preload_plan: Vec<RouteName>,
    current: Mutex<Current>,
}

/// Assembles a [`Router`].
pub struct RouterBuilder {
    table: RouteTable,
    source: Arc<dyn FragmentSource>,
    document: Arc<dyn Document>,
    behaviors: BehaviorRegistry,
    reporter: Arc<dyn FailureReporter>,
    format: LocationFormat,
    preload: Vec<RouteName>,
}

impl RouterBuilder {
    pub fn behaviors(mut self, behaviors: BehaviorRegistry) -> Self {
        self.behaviors = behaviors;
        self
    }

    pub fn reporter(mut self, reporter: Arc<dyn FailureReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn location_format(mut self, format: LocationFormat) -> Self {
        self.format = format;
        self
    }

    /// Routes preloaded when the page becomes ready. Unknown names are ignored.
    pub fn preload(mut self, routes: impl IntoIterator<Item = RouteName>) -> Self {
        self.preload = routes.into_iter().collect();
        self
    }

    pub fn build(self) -> Router {
        let styles = Arc::new(StyleCoordinator::new(self.document.clone()));
        let table = Arc::new(self.table);
        let preload_plan = self
            .preload
            .into_iter()
            .filter(|route| table.contains(route.as_str()))
            .collect();

        Router {
            resolver: NavigationResolver::new(table, self.format),
            document: self.document,
            cache: FragmentCache::new(),
            inflight: InFlight::new(),
            loader: FragmentLoader::new(self.source, self.behaviors, styles.clone()),
            styles,
            lifecycle: LifecycleDispatcher::new(self.reporter),
            preload_plan,
            current: Mutex::new(Current::default()),
        }
    }
}

impl Router {
    pub fn builder(table: RouteTable, source: Arc<dyn FragmentSource>, document: Arc<dyn Document>) -> RouterBuilder {
        RouterBuilder {
            table,
            source,
            document,
            behaviors: BehaviorRegistry::new(),
            reporter: Arc::new(TracingReporter),
            format: LocationFormat::hash(),
            preload: Vec::new(),
        }
    }

    /// Build a router fetching over HTTP as described by `config`.
    pub fn from_config(
        config: &RouterConfig,
        document: Arc<dyn Document>,
        behaviors: BehaviorRegistry,
    ) -> Result<Self, ConfigError> {
        let table = RouteTable::from_config(config).map_err(ConfigError::Validation)?;
        let preload = if config.navigation.preload_all {
            table.names()
        } else {
            config.navigation.preload.iter().map(|r| RouteName::from(r.as_str())).collect()
        };
        let source = Arc::new(HttpFragmentSource::from_config(&config.fetch)?);

        Ok(Self::builder(table, source, document)
            .behaviors(behaviors)
            .location_format(LocationFormat::from_config(&config.navigation))
            .preload(preload)
            .build())
    }

    pub fn table(&self) -> &RouteTable {
        self.resolver.table()
    }

    pub fn resolver(&self) -> &NavigationResolver {
        &self.resolver
    }

    pub fn cache(&self) -> &FragmentCache {
        &self.cache
    }

    pub fn navigation_state(&self) -> NavigationState {
        NavigationState {
            current_route: self.current().route.clone(),
            active_style: self.styles.active(),
        }
    }

    pub fn current_route(&self) -> Option<RouteName> {
        self.current().route.clone()
    }

    pub fn route_state(&self, route: &str) -> RouteState {
        if self.cache.contains(route) {
            let active = self.current().route.as_ref().is_some_and(|r| r == route);
            RouteState::Cached(if active { Residency::Active } else { Residency::Inactive })
        } else if self.inflight.is_loading(route) {
            RouteState::Loading
        } else {
            RouteState::Unloaded
        }
    }

    fn current(&self) -> MutexGuard<'_, Current> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// React to an inbound trigger.
    pub async fn handle(&self, event: NavigationEvent) -> NavigationOutcome {
        match event {
            NavigationEvent::Ready => self.start().await,
            NavigationEvent::HistoryChanged => self.navigate_location().await,
            NavigationEvent::LinkClicked { href } => self.follow_link(&href).await,
        }
    }

    /// First load: normalize the source, start preloads, show the current route.
    pub async fn start(&self) -> NavigationOutcome {
        let source = self.document.location();
        if let Some(normalized) = self.resolver.normalize(&source) {
            tracing::debug!(from = %source, to = %normalized, "Normalized navigation source");
            self.document.set_location(&normalized);
        }

        let (outcome, preloaded) = join(self.navigate_location(), self.preload(&self.preload_plan)).await;
        tracing::info!(route = ?outcome.route(), preloaded, "Router started");
        outcome
    }

    /// Rewrite the source from a clicked link and navigate to it.
    pub async fn follow_link(&self, href: &str) -> NavigationOutcome {
        let target = self.resolver.format().link_target(href);
        self.document.set_location(&target);
        self.navigate_location().await
    }

    /// Navigate to whatever the navigation source currently names.
    pub async fn navigate_location(&self) -> NavigationOutcome {
        if !self.document.has_host_view() {
            tracing::warn!("Host view missing, navigation skipped");
            metrics::record_navigation(NavigationOutcome::Skipped.label());
            return NavigationOutcome::Skipped;
        }

        let source = self.document.location();
        let resolution = self.resolver.resolve(&source);
        let outcome = self.navigate(&resolution.route, resolution.param.as_deref()).await;

        match (resolution.unknown, outcome) {
            (Some(requested), NavigationOutcome::Applied { route, from_cache }) => NavigationOutcome::FellBack {
                requested,
                route,
                from_cache,
            },
            (_, outcome) => outcome,
        }
    }

    /// Show `route` with an optional parameter.
    ///
    /// Unknown routes and failed loads fall back to the not-found route once.
    pub async fn navigate(&self, route: &RouteName, param: Option<&str>) -> NavigationOutcome {
        let span = tracing::info_span!("navigate", nav_id = %Uuid::new_v4(), route = %route);
        let outcome = self.navigate_inner(route, param).instrument(span).await;
        metrics::record_navigation(outcome.label());
        outcome
    }

    async fn navigate_inner(&self, requested: &RouteName, param: Option<&str>) -> NavigationOutcome {
        let not_found = self.table().not_found_route().clone();
        let mut param = param.map(str::to_string);

        let mut target = match self.table().lookup(requested.as_str()) {
            Some(route) => route.clone(),
            None => {
                tracing::debug!(requested = %requested, "Route not in table");
                param = None;
                not_found.clone()
            }
        };

        loop {
            match self.obtain(&target).await {
                Ok((bundle, from_cache)) => {
                    self.apply(&target, &bundle, param.as_deref(), from_cache);
                    return if target == *requested {
                        NavigationOutcome::Applied { route: target, from_cache }
                    } else {
                        NavigationOutcome::FellBack {
                            requested: requested.to_string(),
                            route: target,
                            from_cache,
                        }
                    };
                }
                Err(err) => {
                    let terminal = target == not_found;
                    metrics::record_load_failure(err.kind());
                    self.lifecycle.reporter().report(&Failure::Load {
                        route: target.clone(),
                        kind: err.kind(),
                        message: err.to_string(),
                        terminal,
                    });

                    if terminal {
                        return NavigationOutcome::Failed { route: target };
                    }
                    target = not_found.clone();
                    param = None;
                }
            }
        }
    }

    /// The bundle for `route` and whether it was resident before this call.
    async fn obtain(&self, route: &RouteName) -> LoadResult<(FragmentBundle, bool)> {
        if let Some(bundle) = self.cache.get(route.as_str()) {
            metrics::record_cache_hit();
            return Ok((bundle, true));
        }

        let bundle = self.fetch(route).await?;
        if self.cache.put(route.clone(), bundle.clone()) {
            return Ok((bundle, false));
        }

        // Lost the race: another sequence cached this route first.
        Ok(match self.cache.get(route.as_str()) {
            Some(winner) => (winner, true),
            None => (bundle, false),
        })
    }

    async fn fetch(&self, route: &RouteName) -> LoadResult<FragmentBundle> {
        let _loading = self.inflight.begin(route);
        let fragment = match self.table().get(route.as_str()) {
            Some(entry) => entry.fragment_id.clone(),
            None => route.as_str().into(),
        };
        self.loader.load(route, &fragment).await
    }

    /// Render `bundle` as the current route. Runs without suspending.
    ///
    /// The route lock is only held to read and swap the current route, so
    /// hooks and the document may query the router while it runs.
    fn apply(&self, route: &RouteName, bundle: &FragmentBundle, param: Option<&str>, from_cache: bool) {
        let previous = self.current().route.replace(route.clone());

        let outgoing = previous.and_then(|previous| {
            self.cache.touch_scroll(previous.as_str(), self.document.scroll_offset());
            self.cache.get(previous.as_str()).map(|b| (previous, b))
        });

        self.document.replace_view(bundle.markup());
        self.styles.activate(bundle.style());

        if let Some((previous, outgoing)) = &outgoing {
            self.lifecycle.destroy(previous, outgoing);
        }
        self.lifecycle.init(route, bundle, param, from_cache);

        let offset = self
            .cache
            .get(route.as_str())
            .map(|b| b.scroll_offset())
            .unwrap_or(0.0);
        self.document.scroll_to(offset);

        tracing::info!(route = %route, param = ?param, from_cache, scroll = offset, "Fragment applied");
    }

    /// Fetch and cache routes without rendering them.
    ///
    /// Skips routes that are cached, already loading, or not in the table.
    /// Returns how many routes this call added to the cache.
    pub async fn preload(&self, routes: &[RouteName]) -> usize {
        let mut pending: Vec<(RouteName, _)> = Vec::new();
        for route in routes {
            let Some(route) = self.table().lookup(route.as_str()) else {
                tracing::debug!(route = %route, "Ignoring preload of unknown route");
                continue;
            };
            if self.cache.contains(route.as_str()) || self.inflight.is_loading(route.as_str()) {
                continue;
            }
            // Mark loading now so overlapping preload calls skip this route.
            let guard = self.inflight.begin(route);
            pending.push((route.clone(), guard));
        }

        let loads = pending.into_iter().map(|(route, guard)| async move {
            let result = self.load_detached(&route).await;
            drop(guard);
            match result {
                Ok(stored) => stored,
                Err(err) => {
                    metrics::record_load_failure(err.kind());
                    self.lifecycle.reporter().report(&Failure::Load {
                        route,
                        kind: err.kind(),
                        message: err.to_string(),
                        terminal: false,
                    });
                    false
                }
            }
        });

        join_all(loads).await.into_iter().filter(|stored| *stored).count()
    }

    async fn load_detached(&self, route: &RouteName) -> LoadResult<bool> {
        let span = tracing::debug_span!("preload", route = %route);
        let bundle = self.fetch(route).instrument(span).await?;
        Ok(self.cache.put(route.clone(), bundle))
    }

    /// Run [`Router::preload`] as a background task.
    pub fn spawn_preload(self: &Arc<Self>, routes: Vec<RouteName>) -> tokio::task::JoinHandle<usize> {
        let router = Arc::clone(self);
        tokio::spawn(async move { router.preload(&routes).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::fragment::StaticFragmentSource;
    use crate::lifecycle::CollectingReporter;
    use crate::routing::FragmentId;

    fn table() -> RouteTable {
        RouteTable::new(
            [
                (RouteName::from("home"), FragmentId::from("home")),
                (RouteName::from("about"), FragmentId::from("about")),
                (RouteName::from("404"), FragmentId::from("404")),
            ],
            "home",
            "404",
        )
        .unwrap()
    }

    fn behaviors() -> BehaviorRegistry {
        let mut registry = BehaviorRegistry::new();
        registry.register_noop("home").register_noop("about").register_noop("404");
        registry
    }

    fn router(source: StaticFragmentSource) -> (Router, Arc<MemoryDocument>, Arc<StaticFragmentSource>) {
        let doc = Arc::new(MemoryDocument::new("#/home"));
        let source = Arc::new(source);
        let router = Router::builder(table(), source.clone(), doc.clone())
            .behaviors(behaviors())
            .build();
        (router, doc, source)
    }

    fn full_source() -> StaticFragmentSource {
        StaticFragmentSource::new()
            .with_fragment("home", "<h1>Home</h1>", "h1{}")
            .with_fragment("about", "<h1>About</h1>", "h2{}")
            .with_fragment("404", "<h1>Not found</h1>", "h3{}")
    }

    #[tokio::test]
    async fn test_cold_then_cached_navigation() {
        let (router, doc, source) = router(full_source());
        let home = RouteName::from("home");

        let outcome = router.navigate(&home, None).await;
        assert_eq!(outcome, NavigationOutcome::Applied { route: home.clone(), from_cache: false });
        assert_eq!(doc.view().as_deref(), Some("<h1>Home</h1>"));
        assert_eq!(source.fetch_count("home"), 2);

        let outcome = router.navigate(&home, Some("7")).await;
        assert_eq!(outcome.from_cache(), Some(true));
        assert_eq!(source.fetch_count("home"), 2);
        assert_eq!(router.route_state("home"), RouteState::Cached(Residency::Active));
    }

    #[tokio::test]
    async fn test_spawned_preload_fills_cache() {
        let (router, doc, source) = router(full_source());
        let router = Arc::new(router);

        let handle = router.spawn_preload(vec![RouteName::from("about"), RouteName::from("404")]);
        assert_eq!(handle.await.unwrap(), 2);

        assert_eq!(router.route_state("about"), RouteState::Cached(Residency::Inactive));
        assert_eq!(router.route_state("404"), RouteState::Cached(Residency::Inactive));
        assert_eq!(source.fetch_count("about"), 2);
        assert_eq!(doc.view().as_deref(), Some(""));

        let outcome = router.navigate(&RouteName::from("about"), None).await;
        assert_eq!(outcome.from_cache(), Some(true));
        assert_eq!(source.fetch_count("about"), 2);
    }

    #[tokio::test]
    async fn test_failed_load_falls_back_once() {
        let source = StaticFragmentSource::new()
            .with_fragment("home", "<h1>Home</h1>", "h1{}")
            .with_markup_only("about", "<h1>About</h1>")
            .with_fragment("404", "<h1>Not found</h1>", "h3{}");
        let (router, doc, _) = router(source);

        let outcome = router.navigate(&RouteName::from("about"), Some("1")).await;
        assert_eq!(
            outcome,
            NavigationOutcome::FellBack {
                requested: "about".into(),
                route: RouteName::from("404"),
                from_cache: false,
            }
        );
        assert_eq!(doc.view().as_deref(), Some("<h1>Not found</h1>"));
        assert_eq!(router.route_state("about"), RouteState::Unloaded);
    }

    #[tokio::test]
    async fn test_not_found_failure_is_terminal() {
        let source = StaticFragmentSource::new().with_fragment("home", "<h1>Home</h1>", "h1{}");
        let doc = Arc::new(MemoryDocument::new("#/home"));
        let reporter = Arc::new(CollectingReporter::new());
        let router = Router::builder(table(), Arc::new(source), doc.clone())
            .behaviors(behaviors())
            .reporter(reporter.clone())
            .build();

        let outcome = router.navigate(&RouteName::from("about"), None).await;
        assert_eq!(outcome, NavigationOutcome::Failed { route: RouteName::from("404") });
        assert_eq!(doc.view().as_deref(), Some(""));

        let failures = reporter.failures();
        assert_eq!(failures.len(), 2);
        assert!(matches!(&failures[1], Failure::Load { terminal: true, .. }));
    }

    #[tokio::test]
    async fn test_preload_leaves_view_untouched() {
        let (router, doc, source) = router(full_source());

        let stored = router.preload(&[RouteName::from("about"), RouteName::from("about")]).await;
        assert_eq!(stored, 1);
        assert_eq!(doc.view_writes(), 0);
        assert_eq!(router.route_state("about"), RouteState::Cached(Residency::Inactive));
        assert_eq!(router.navigation_state(), NavigationState::default());

        let outcome = router.navigate(&RouteName::from("about"), None).await;
        assert_eq!(outcome.from_cache(), Some(true));
        assert_eq!(source.fetch_count("about"), 2);
    }

    #[tokio::test]
    async fn test_missing_host_view_skips() {
        let doc = Arc::new(MemoryDocument::without_host_view("#/home"));
        let router = Router::builder(table(), Arc::new(full_source()), doc)
            .behaviors(behaviors())
            .build();

        assert_eq!(router.navigate_location().await, NavigationOutcome::Skipped);
        assert!(router.cache().is_empty());
    }
}
