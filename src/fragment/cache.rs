//! In-memory fragment cache.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::fragment::bundle::FragmentBundle;
use crate::observability::metrics;
use crate::routing::RouteName;

/// Write-once store of loaded fragments, keyed by route.
///
/// Entries are never evicted; the cache is bounded by the route table.
#[derive(Debug, Default)]
pub struct FragmentCache {
    inner: DashMap<RouteName, FragmentBundle>,
}

impl FragmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the bundle cached for `route`.
    pub fn get(&self, route: &str) -> Option<FragmentBundle> {
        self.inner.get(route).map(|r| r.value().clone())
    }

    pub fn contains(&self, route: &str) -> bool {
        self.inner.contains_key(route)
    }

    /// Store `bundle` unless `route` already has one.
    ///
    /// Returns false (and drops `bundle`) when the slot is taken: the first
    /// successful put wins.
    #[must_use]
    pub fn put(&self, route: RouteName, bundle: FragmentBundle) -> bool {
        match self.inner.entry(route) {
            Entry::Occupied(entry) => {
                tracing::debug!(route = %entry.key(), "Fragment already cached, keeping first bundle");
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(bundle);
                metrics::record_cached_fragments(self.inner.len());
                true
            }
        }
    }

    /// Record the scroll position for an existing entry.
    pub fn touch_scroll(&self, route: &str, offset: f64) -> bool {
        match self.inner.get_mut(route) {
            Some(mut bundle) => {
                bundle.set_scroll_offset(offset);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Cached route names, sorted.
    pub fn routes(&self) -> Vec<RouteName> {
        let mut routes: Vec<_> = self.inner.iter().map(|r| r.key().clone()).collect();
        routes.sort();
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::document::MemoryDocument;
    use crate::fragment::behavior::NoopBehavior;
    use crate::style::StyleCoordinator;

    fn bundle(styles: &StyleCoordinator, markup: &str) -> FragmentBundle {
        FragmentBundle::new(markup, styles.create("p{}"), Arc::new(NoopBehavior))
    }

    #[test]
    fn test_cache_operations() {
        let styles = StyleCoordinator::new(Arc::new(MemoryDocument::new("")));
        let cache = FragmentCache::new();

        assert!(cache.get("home").is_none());
        assert!(cache.put(RouteName::from("home"), bundle(&styles, "<p>home</p>")));

        let cached = cache.get("home").unwrap();
        assert_eq!(cached.markup(), "<p>home</p>");
        assert_eq!(cached.scroll_offset(), 0.0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_is_write_once() {
        let styles = StyleCoordinator::new(Arc::new(MemoryDocument::new("")));
        let cache = FragmentCache::new();

        assert!(cache.put(RouteName::from("home"), bundle(&styles, "first")));
        assert!(!cache.put(RouteName::from("home"), bundle(&styles, "second")));
        assert_eq!(cache.get("home").unwrap().markup(), "first");
    }

    #[test]
    fn test_touch_scroll_only_existing() {
        let styles = StyleCoordinator::new(Arc::new(MemoryDocument::new("")));
        let cache = FragmentCache::new();

        assert!(!cache.touch_scroll("home", 120.0));
        assert!(cache.is_empty());

        assert!(cache.put(RouteName::from("home"), bundle(&styles, "home")));
        assert!(cache.touch_scroll("home", 120.0));
        assert_eq!(cache.get("home").unwrap().scroll_offset(), 120.0);
        assert_eq!(cache.routes(), vec![RouteName::from("home")]);
    }
}
