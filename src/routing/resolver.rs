//! Navigation source resolution.
//!
//! # Responsibilities
//! - Turn a navigation source into `(route, param)`
//! - Fall back to the default route when no route is named
//! - Substitute the not-found route for unknown names
//!
//! # Design Decisions
//! - Never fails: the not-found fallback always yields a valid route
//! - Only the first two non-empty segments are significant
//! - The param is dropped when the not-found route is substituted

use std::sync::Arc;

use crate::routing::location::LocationFormat;
use crate::routing::name::RouteName;
use crate::routing::table::RouteTable;

/// Outcome of resolving a navigation source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// A route guaranteed to be in the table.
    pub route: RouteName,

    /// Second path segment, if any.
    pub param: Option<String>,

    /// The unknown route name that was replaced by the not-found route.
    pub unknown: Option<String>,
}

/// Resolves navigation sources against a route table.
#[derive(Debug, Clone)]
pub struct NavigationResolver {
    table: Arc<RouteTable>,
    format: LocationFormat,
}

impl NavigationResolver {
    pub fn new(table: Arc<RouteTable>, format: LocationFormat) -> Self {
        Self { table, format }
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn format(&self) -> &LocationFormat {
        &self.format
    }

    /// Resolve `source` into a route and optional parameter.
    pub fn resolve(&self, source: &str) -> Resolution {
        let mut segments = self
            .format
            .route_path(source)
            .split('/')
            .filter(|segment| !segment.is_empty());

        let candidate = segments.next();
        let param = segments.next().map(str::to_string);

        let Some(candidate) = candidate else {
            return Resolution {
                route: self.table.default_route().clone(),
                param,
                unknown: None,
            };
        };

        match self.table.lookup(candidate) {
            Some(route) => Resolution {
                route: route.clone(),
                param,
                unknown: None,
            },
            None => {
                tracing::debug!(requested = %candidate, "Unknown route, using not-found route");
                Resolution {
                    route: self.table.not_found_route().clone(),
                    param: None,
                    unknown: Some(candidate.to_string()),
                }
            }
        }
    }

    /// First-load rewrite of the source, if it needs one.
    pub fn normalize(&self, source: &str) -> Option<String> {
        self.format.normalize(source, self.table.default_route())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::NavigationMode;
    use crate::routing::name::FragmentId;

    fn resolver(format: LocationFormat) -> NavigationResolver {
        let table = RouteTable::new(
            [
                (RouteName::from("home"), FragmentId::from("home")),
                (RouteName::from("about"), FragmentId::from("about")),
                (RouteName::from("404"), FragmentId::from("404")),
            ],
            "home",
            "404",
        )
        .unwrap();
        NavigationResolver::new(Arc::new(table), format)
    }

    #[test]
    fn test_empty_source_resolves_default() {
        let r = resolver(LocationFormat::hash());
        let res = r.resolve("");
        assert_eq!(res.route, "home");
        assert_eq!(res.param, None);
        assert_eq!(res.unknown, None);
    }

    #[test]
    fn test_route_with_param() {
        let r = resolver(LocationFormat::hash());
        let res = r.resolve("/about/42");
        assert_eq!(res.route, "about");
        assert_eq!(res.param.as_deref(), Some("42"));

        let res = r.resolve("#//about///42/extra");
        assert_eq!(res.route, "about");
        assert_eq!(res.param.as_deref(), Some("42"));
    }

    #[test]
    fn test_unknown_route_falls_back() {
        let r = resolver(LocationFormat::hash());
        let res = r.resolve("/missing");
        assert_eq!(res.route, "404");
        assert_eq!(res.unknown.as_deref(), Some("missing"));

        // Param is not carried onto the not-found route
        let res = r.resolve("#/missing/7");
        assert_eq!(res.route, "404");
        assert_eq!(res.param, None);
    }

    #[test]
    fn test_path_mode_strips_app_root() {
        let r = resolver(LocationFormat::new(NavigationMode::Path, "/site/"));
        let res = r.resolve("/site/about/x");
        assert_eq!(res.route, "about");
        assert_eq!(res.param.as_deref(), Some("x"));
        assert_eq!(r.resolve("/site/").route, "home");
    }

    #[test]
    fn test_normalize_uses_default_route() {
        let r = resolver(LocationFormat::hash());
        assert_eq!(r.normalize("").as_deref(), Some("#/home"));
        assert_eq!(r.normalize("#/about"), None);
    }
}
