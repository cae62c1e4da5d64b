//! Fragment stylesheet management.
//!
//! Every cached fragment owns one stylesheet. Sheets are inserted lazily on
//! first activation and afterwards only toggled, so returning to a cached
//! route never re-parses its CSS.

pub mod coordinator;

pub use coordinator::{StyleCoordinator, StyleHandle, StyleId};
