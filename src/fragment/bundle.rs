//! Loaded fragment bundles.

use std::fmt;
use std::sync::Arc;

use crate::fragment::behavior::BehaviorModule;
use crate::style::StyleHandle;

/// The cached, loaded form of a fragment.
///
/// Immutable apart from `scroll_offset`, which the cache updates whenever
/// navigation leaves the route.
#[derive(Clone)]
pub struct FragmentBundle {
    markup: Arc<str>,
    style: StyleHandle,
    behavior: Arc<dyn BehaviorModule>,
    scroll_offset: f64,
}

impl FragmentBundle {
    pub fn new(markup: impl Into<Arc<str>>, style: StyleHandle, behavior: Arc<dyn BehaviorModule>) -> Self {
        Self {
            markup: markup.into(),
            style,
            behavior,
            scroll_offset: 0.0,
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn style(&self) -> &StyleHandle {
        &self.style
    }

    pub fn behavior(&self) -> &Arc<dyn BehaviorModule> {
        &self.behavior
    }

    /// Scroll position when navigation last left this route (0 if never).
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub(crate) fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }
}

impl fmt::Debug for FragmentBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentBundle")
            .field("markup_len", &self.markup.len())
            .field("style", &self.style.id())
            .field("scroll_offset", &self.scroll_offset)
            .finish_non_exhaustive()
    }
}
