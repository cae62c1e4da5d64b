//! Stylesheet activation.
//!
//! # Invariant
//! Immediately after `activate(h)` returns, `h` is the only enabled
//! stylesheet among every handle this coordinator created.
//!
//! # State Transitions
//! ```text
//! created (not inserted) → inserted + disabled → enabled
//! enabled → disabled: another handle was activated
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::document::Document;

/// Identity of an inserted stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(u64);

impl StyleId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "style-{}", self.0)
    }
}

/// A fragment's stylesheet, possibly not yet inserted into the document.
#[derive(Debug, Clone)]
pub struct StyleHandle {
    id: StyleId,
    css: Arc<str>,
}

impl StyleHandle {
    pub fn id(&self) -> StyleId {
        self.id
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}

/// Keeps exactly one fragment stylesheet enabled at a time.
pub struct StyleCoordinator {
    document: Arc<dyn Document>,
    next_id: AtomicU64,
    active: Mutex<Option<StyleId>>,
}

impl StyleCoordinator {
    pub fn new(document: Arc<dyn Document>) -> Self {
        Self {
            document,
            next_id: AtomicU64::new(1),
            active: Mutex::new(None),
        }
    }

    /// Create a handle for `css`. Nothing touches the document until activation.
    pub fn create(&self, css: impl Into<Arc<str>>) -> StyleHandle {
        let id = StyleId(self.next_id.fetch_add(1, Ordering::Relaxed));
        StyleHandle { id, css: css.into() }
    }

    /// Make `handle` the single enabled stylesheet.
    ///
    /// A no-op when `handle` is already active.
    pub fn activate(&self, handle: &StyleHandle) {
        let previous = {
            let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
            if *active == Some(handle.id) {
                return;
            }
            active.replace(handle.id)
        };

        if let Some(previous) = previous {
            self.document.set_style_disabled(previous, true);
        }

        if !self.document.contains_style(handle.id) {
            self.document.insert_style(handle.id, &handle.css, true);
        }
        self.document.set_style_disabled(handle.id, false);

        tracing::trace!(style = %handle.id, "Stylesheet activated");
    }

    /// The currently enabled stylesheet.
    pub fn active(&self) -> Option<StyleId> {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_active(&self, handle: &StyleHandle) -> bool {
        self.active() == Some(handle.id)
    }
}

impl fmt::Debug for StyleCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleCoordinator")
            .field("active", &self.active())
            .finish_non_exhaustive()
    }
}
