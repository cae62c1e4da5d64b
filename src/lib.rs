//! Client-side fragment router.
//!
//! Maps a logical route to a content fragment (markup + stylesheet +
//! behavior module), loads it lazily and at most once per session, and
//! swaps it into a persistent host view.

pub mod config;
pub mod document;
pub mod error;
pub mod fragment;
pub mod lifecycle;
pub mod loader;
pub mod observability;
pub mod routing;
pub mod style;

pub use config::RouterConfig;
pub use document::{Document, MemoryDocument};
pub use error::{FailureKind, HookError, LoadError};
pub use fragment::{BehaviorModule, BehaviorRegistry, FragmentSource};
pub use loader::{NavigationEvent, NavigationOutcome, RouteState, Router};
pub use routing::{FragmentId, RouteName, RouteTable};
