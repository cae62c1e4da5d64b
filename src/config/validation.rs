//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default/not-found/preload name real routes)
//! - Validate value ranges (timeouts > 0, parseable base URL)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::{NavigationMode, RouterConfig};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NoRoutes,
    UnknownDefaultRoute(String),
    UnknownNotFoundRoute(String),
    UnknownPreloadRoute(String),
    InvalidFragment { route: String, fragment: String },
    InvalidBaseUrl(String),
    ZeroTimeout,
    InvalidAppRoot(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoRoutes => write!(f, "route table is empty"),
            ValidationError::UnknownDefaultRoute(r) => {
                write!(f, "default route '{}' is not in the route table", r)
            }
            ValidationError::UnknownNotFoundRoute(r) => {
                write!(f, "not-found route '{}' is not in the route table", r)
            }
            ValidationError::UnknownPreloadRoute(r) => {
                write!(f, "preload route '{}' is not in the route table", r)
            }
            ValidationError::InvalidFragment { route, fragment } => {
                write!(f, "route '{}' has invalid fragment id '{}'", route, fragment)
            }
            ValidationError::InvalidBaseUrl(u) => write!(f, "invalid base url '{}'", u),
            ValidationError::ZeroTimeout => write!(f, "fetch.timeout_secs must be > 0"),
            ValidationError::InvalidAppRoot(r) => {
                write!(f, "app_root '{}' must start and end with '/'", r)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let nav = &config.navigation;

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    if !config.routes.contains_key(&nav.default_route) {
        errors.push(ValidationError::UnknownDefaultRoute(nav.default_route.clone()));
    }

    if !config.routes.contains_key(&nav.not_found_route) {
        errors.push(ValidationError::UnknownNotFoundRoute(nav.not_found_route.clone()));
    }

    for name in &nav.preload {
        if !config.routes.contains_key(name) {
            errors.push(ValidationError::UnknownPreloadRoute(name.clone()));
        }
    }

    for (name, route) in &config.routes {
        if route.fragment.is_empty() || route.fragment.contains('/') {
            errors.push(ValidationError::InvalidFragment {
                route: name.clone(),
                fragment: route.fragment.clone(),
            });
        }
    }

    if Url::parse(&config.fetch.base_url).is_err() {
        errors.push(ValidationError::InvalidBaseUrl(config.fetch.base_url.clone()));
    }

    if config.fetch.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if nav.mode == NavigationMode::Path
        && !(nav.app_root.starts_with('/') && nav.app_root.ends_with('/'))
    {
        errors.push(ValidationError::InvalidAppRoot(nav.app_root.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
