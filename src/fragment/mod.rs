//! Fragments: the markup + style + behavior triple behind each route.
//!
//! # Data Flow
//! ```text
//! FragmentSource (markup, style text)   BehaviorRegistry (module)
//!                 \                       /
//!                  → FragmentBundle (loaded form)
//!                  → FragmentCache (write-once, never evicted)
//! ```

pub mod behavior;
pub mod bundle;
pub mod cache;
pub mod source;

pub use behavior::{BehaviorFactory, BehaviorModule, BehaviorRegistry, NoopBehavior, StatusBehavior, StatusLine};
pub use bundle::FragmentBundle;
pub use cache::FragmentCache;
pub use source::{FragmentSource, HttpFragmentSource, StaticFragmentSource};
