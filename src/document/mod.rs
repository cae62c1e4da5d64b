//! Host document abstraction.
//!
//! # Responsibilities
//! - Expose the single host view whose content is replaced on apply
//! - Hold inserted stylesheets and their enabled/disabled flag
//! - Report and restore the scroll position
//! - Carry the navigation source (hash or path)
//!
//! # Design Decisions
//! - Synchronous, infallible operations: DOM mutation is not a suspension point
//! - `&self` methods so one document can be shared behind an `Arc`
//! - `MemoryDocument` is the headless implementation used by the binary and tests

pub mod memory;

pub use memory::MemoryDocument;

use crate::style::StyleId;

/// The page the router renders into.
pub trait Document: Send + Sync {
    /// Current navigation source.
    fn location(&self) -> String;

    /// Rewrite the navigation source in place.
    fn set_location(&self, location: &str);

    /// Whether the designated host view exists.
    fn has_host_view(&self) -> bool {
        true
    }

    /// Replace the host view's content wholesale.
    fn replace_view(&self, markup: &str);

    fn scroll_offset(&self) -> f64;

    fn scroll_to(&self, offset: f64);

    fn contains_style(&self, id: StyleId) -> bool;

    /// Insert a stylesheet; `disabled` sets its initial state.
    fn insert_style(&self, id: StyleId, css: &str, disabled: bool);

    fn set_style_disabled(&self, id: StyleId, disabled: bool);
}
