//! In-memory document.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::document::Document;
use crate::style::StyleId;

#[derive(Debug, Clone)]
struct InsertedStyle {
    id: StyleId,
    css: String,
    disabled: bool,
}

#[derive(Debug, Default)]
struct Inner {
    location: String,
    /// `None` when the page has no host view.
    view: Option<String>,
    scroll: f64,
    styles: Vec<InsertedStyle>,
    style_toggles: usize,
    view_writes: usize,
}

/// A document that keeps all state in memory.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    inner: Mutex<Inner>,
}

impl MemoryDocument {
    /// A document with an empty host view at `location`.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                location: location.into(),
                view: Some(String::new()),
                ..Default::default()
            }),
        }
    }

    /// A document whose host view is missing.
    pub fn without_host_view(location: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                location: location.into(),
                view: None,
                ..Default::default()
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current host view content.
    pub fn view(&self) -> Option<String> {
        self.inner().view.clone()
    }

    /// Styles currently enabled, in insertion order.
    pub fn enabled_styles(&self) -> Vec<StyleId> {
        self.inner()
            .styles
            .iter()
            .filter(|s| !s.disabled)
            .map(|s| s.id)
            .collect()
    }

    /// Text of the single enabled stylesheet, if exactly one is enabled.
    pub fn active_css(&self) -> Option<String> {
        let inner = self.inner();
        let mut enabled = inner.styles.iter().filter(|s| !s.disabled);
        match (enabled.next(), enabled.next()) {
            (Some(style), None) => Some(style.css.clone()),
            _ => None,
        }
    }

    pub fn style_count(&self) -> usize {
        self.inner().styles.len()
    }

    /// Number of enable/disable flips performed on stylesheets.
    pub fn style_toggles(&self) -> usize {
        self.inner().style_toggles
    }

    /// Number of times the host view was replaced.
    pub fn view_writes(&self) -> usize {
        self.inner().view_writes
    }
}

impl Document for MemoryDocument {
    fn location(&self) -> String {
        self.inner().location.clone()
    }

    fn set_location(&self, location: &str) {
        self.inner().location = location.to_string();
    }

    fn has_host_view(&self) -> bool {
        self.inner().view.is_some()
    }

    fn replace_view(&self, markup: &str) {
        let mut inner = self.inner();
        if let Some(view) = inner.view.as_mut() {
            view.clear();
            view.push_str(markup);
            inner.view_writes += 1;
        }
    }

    fn scroll_offset(&self) -> f64 {
        self.inner().scroll
    }

    fn scroll_to(&self, offset: f64) {
        self.inner().scroll = offset;
    }

    fn contains_style(&self, id: StyleId) -> bool {
        self.inner().styles.iter().any(|s| s.id == id)
    }

    fn insert_style(&self, id: StyleId, css: &str, disabled: bool) {
        let mut inner = self.inner();
        if inner.styles.iter().any(|s| s.id == id) {
            return;
        }
        inner.styles.push(InsertedStyle {
            id,
            css: css.to_string(),
            disabled,
        });
    }

    fn set_style_disabled(&self, id: StyleId, disabled: bool) {
        let mut inner = self.inner();
        let mut toggled = false;
        if let Some(style) = inner.styles.iter_mut().find(|s| s.id == id) {
            toggled = style.disabled != disabled;
            style.disabled = disabled;
        }
        if toggled {
            inner.style_toggles += 1;
        }
    }
}
