//! Navigation source formatting.
//!
//! # Responsibilities
//! - Strip the application-root prefix before route parsing
//! - Normalize the source on first load (missing marker, duplicate `/`)
//! - Rewrite intercepted link hrefs into canonical sources
//!
//! # Design Decisions
//! - One mode per deployment: either `#/route/param` or `<app_root>route/param`
//! - Absolute hrefs are reduced to the part that carries the route

use std::borrow::Cow;

use url::Url;

use crate::config::schema::{NavigationConfig, NavigationMode};
use crate::routing::name::RouteName;

const HASH_MARKER: &str = "#/";

/// Knows how routes are encoded in the navigation source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFormat {
    mode: NavigationMode,
    app_root: String,
}

impl LocationFormat {
    pub fn new(mode: NavigationMode, app_root: impl Into<String>) -> Self {
        Self {
            mode,
            app_root: app_root.into(),
        }
    }

    pub fn hash() -> Self {
        Self::new(NavigationMode::Hash, "/")
    }

    pub fn from_config(config: &NavigationConfig) -> Self {
        Self::new(config.mode, config.app_root.clone())
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// The part of `source` that holds `route/param`.
    pub fn route_path<'a>(&self, source: &'a str) -> &'a str {
        match self.mode {
            NavigationMode::Hash => source.strip_prefix('#').unwrap_or(source),
            NavigationMode::Path => {
                let path = source.split(['?', '#']).next().unwrap_or_default();
                let root = self.app_root.trim_end_matches('/');
                path.strip_prefix(self.app_root.as_str())
                    .or_else(|| (path == root).then_some(""))
                    .unwrap_or(path)
            }
        }
    }

    /// First-load normalization.
    ///
    /// Returns the rewritten source, or `None` when it is already canonical.
    pub fn normalize(&self, source: &str, default_route: &RouteName) -> Option<String> {
        let normalized = match self.mode {
            NavigationMode::Hash => {
                if source.starts_with(HASH_MARKER) {
                    format!("{}{}", HASH_MARKER, collapse_separators(source[1..].trim_start_matches('/')))
                } else {
                    format!("{}{}", HASH_MARKER, default_route)
                }
            }
            NavigationMode::Path => {
                let collapsed = collapse_separators(source);
                let root = self.app_root.trim_end_matches('/');
                if collapsed.starts_with(self.app_root.as_str()) || collapsed == root {
                    collapsed.into_owned()
                } else {
                    format!("{}{}", self.app_root, default_route)
                }
            }
        };

        (normalized != source).then_some(normalized)
    }

    /// Canonical source for an intercepted link's href.
    pub fn link_target(&self, href: &str) -> String {
        if let Ok(url) = Url::parse(href) {
            return match self.mode {
                NavigationMode::Hash => self.link_target(url.fragment().unwrap_or_default()),
                NavigationMode::Path => collapse_separators(url.path()).into_owned(),
            };
        }

        let trimmed = href.trim_start_matches('#');
        match self.mode {
            NavigationMode::Hash => {
                format!("{}{}", HASH_MARKER, collapse_separators(trimmed.trim_start_matches('/')))
            }
            NavigationMode::Path if trimmed.starts_with('/') => collapse_separators(trimmed).into_owned(),
            NavigationMode::Path => format!("{}{}", self.app_root, collapse_separators(trimmed)),
        }
    }

    /// Source that navigates to `route` with an optional parameter.
    pub fn source_for(&self, route: &RouteName, param: Option<&str>) -> String {
        let prefix = match self.mode {
            NavigationMode::Hash => HASH_MARKER,
            NavigationMode::Path => self.app_root.as_str(),
        };
        match param {
            Some(param) => format!("{}{}/{}", prefix, route, param),
            None => format!("{}{}", prefix, route),
        }
    }
}

/// Collapse every run of `/` into a single separator.
pub fn collapse_separators(input: &str) -> Cow<'_, str> {
    if !input.contains("//") {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut previous_slash = false;
    for ch in input.chars() {
        if ch == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(ch);
    }
    Cow::Owned(out)
}
