//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the fragment router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// How the navigation source is read and which routes are special.
    pub navigation: NavigationConfig,

    /// Where fragment artifacts are fetched from.
    pub fetch: FetchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route table: route name -> fragment.
    pub routes: BTreeMap<String, RouteConfig>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        let mut routes = BTreeMap::new();
        routes.insert("home".to_string(), RouteConfig::new("home"));
        routes.insert("404".to_string(), RouteConfig::new("404"));

        Self {
            navigation: NavigationConfig::default(),
            fetch: FetchConfig::default(),
            observability: ObservabilityConfig::default(),
            routes,
        }
    }
}

/// Which part of the location carries the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// `#/route/param`
    #[default]
    Hash,
    /// `<app_root>route/param`
    Path,
}

/// Navigation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Hash or path based navigation, fixed per deployment.
    pub mode: NavigationMode,

    /// Application root prefix stripped before route parsing (path mode).
    pub app_root: String,

    /// Route shown when the source names no route.
    pub default_route: String,

    /// Route shown for unknown routes and failed loads.
    pub not_found_route: String,

    /// Routes fetched into the cache when the page becomes ready.
    pub preload: Vec<String>,

    /// Preload every route in the table when the page becomes ready.
    pub preload_all: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            mode: NavigationMode::Hash,
            app_root: "/".to_string(),
            default_route: "home".to_string(),
            not_found_route: "404".to_string(),
            preload: Vec::new(),
            preload_all: false,
        }
    }
}

/// A single route table entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Fragment identifier; artifacts live under `pages/<fragment>/`.
    pub fragment: String,
}

impl RouteConfig {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }
}

/// Fragment fetch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base URL the `pages/` directory is resolved against.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Markup file name inside each fragment directory.
    pub markup_file: String,

    /// Stylesheet file name inside each fragment directory.
    pub style_file: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/".to_string(),
            timeout_secs: 10,
            markup_file: "app.component.html".to_string(),
            style_file: "app.component.css".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert_eq!(config.navigation.mode, NavigationMode::Hash);
        assert_eq!(config.navigation.default_route, "home");
        assert!(config.routes.contains_key("404"));
        assert_eq!(config.fetch.markup_file, "app.component.html");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: RouterConfig = toml::from_str(
            r#"
            [navigation]
            mode = "path"
            app_root = "/app/"

            [routes.home]
            fragment = "home"

            [routes.about]
            fragment = "about"
            "#,
        )
        .unwrap();

        assert_eq!(config.navigation.mode, NavigationMode::Path);
        assert_eq!(config.navigation.app_root, "/app/");
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes["about"], RouteConfig::new("about"));
        // Untouched sections keep their defaults
        assert_eq!(config.fetch.timeout_secs, 10);
    }
}
