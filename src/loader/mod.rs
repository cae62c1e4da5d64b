//! Loading and navigation.
//!
//! # Data Flow
//! ```text
//! navigate(route, param)
//!     → cache hit?  yes → apply (no I/O)
//!                   no  → fetch.rs: markup → style → behavior
//!                         → cache.put (first put wins)
//!                         → apply
//!     → load failed? → navigate(not-found) once, else terminal
//!
//! preload(routes)
//!     → fetch.rs for each Unloaded route, concurrently
//!     → cache.put, no apply
//! ```

pub mod fetch;
pub mod orchestrator;
pub mod state;

pub use fetch::FragmentLoader;
pub use orchestrator::{NavigationEvent, NavigationOutcome, NavigationState, Router, RouterBuilder};
pub use state::{InFlight, LoadingGuard, Residency, RouteState};
