//! Route table lookup.
//!
//! # Responsibilities
//! - Store the closed set of routes and their fragments
//! - Hold the designated default and not-found routes
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - Construction fails unless default and not-found are real keys

use std::collections::HashMap;

use crate::config::schema::RouterConfig;
use crate::config::validation::ValidationError;
use crate::routing::name::{FragmentId, RouteName};

/// Where a route's fragment lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub fragment_id: FragmentId,
}

/// The closed mapping from route name to fragment.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: HashMap<RouteName, RouteEntry>,
    default_route: RouteName,
    not_found_route: RouteName,
}

impl RouteTable {
    /// Build a table, checking that the special routes exist.
    pub fn new(
        entries: impl IntoIterator<Item = (RouteName, FragmentId)>,
        default_route: impl Into<RouteName>,
        not_found_route: impl Into<RouteName>,
    ) -> Result<Self, Vec<ValidationError>> {
        let entries: HashMap<_, _> = entries
            .into_iter()
            .map(|(name, fragment_id)| (name, RouteEntry { fragment_id }))
            .collect();
        let default_route = default_route.into();
        let not_found_route = not_found_route.into();

        let mut errors = Vec::new();
        if entries.is_empty() {
            errors.push(ValidationError::NoRoutes);
        }
        if !entries.contains_key(&default_route) {
            errors.push(ValidationError::UnknownDefaultRoute(default_route.to_string()));
        }
        if !entries.contains_key(&not_found_route) {
            errors.push(ValidationError::UnknownNotFoundRoute(not_found_route.to_string()));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            entries,
            default_route,
            not_found_route,
        })
    }

    /// Build the table from a validated configuration.
    pub fn from_config(config: &RouterConfig) -> Result<Self, Vec<ValidationError>> {
        Self::new(
            config
                .routes
                .iter()
                .map(|(name, route)| (RouteName::from(name.as_str()), FragmentId::from(route.fragment.as_str()))),
            config.navigation.default_route.as_str(),
            config.navigation.not_found_route.as_str(),
        )
    }

    pub fn get(&self, route: &str) -> Option<&RouteEntry> {
        self.entries.get(route)
    }

    pub fn contains(&self, route: &str) -> bool {
        self.entries.contains_key(route)
    }

    /// The canonical name for `route`, if it is in the table.
    pub fn lookup(&self, route: &str) -> Option<&RouteName> {
        self.entries.get_key_value(route).map(|(name, _)| name)
    }

    pub fn default_route(&self) -> &RouteName {
        &self.default_route
    }

    pub fn not_found_route(&self) -> &RouteName {
        &self.not_found_route
    }

    /// All route names, sorted for deterministic iteration.
    pub fn names(&self) -> Vec<RouteName> {
        let mut names: Vec<_> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
