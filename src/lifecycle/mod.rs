//! Fragment lifecycle management.
//!
//! # Data Flow
//! ```text
//! Apply step (router):
//!     outgoing bundle → dispatcher.destroy (on_destroy)
//!     incoming bundle → dispatcher.init (on_init(param, from_cache))
//!
//! Hook error or panic:
//!     → report.rs Failure::Hook
//!     → FailureReporter (tracing by default)
//! ```
//!
//! # Design Decisions
//! - Hooks are optional: `BehaviorModule` defaults both to no-ops
//! - Failures are absorbed; navigation always completes

pub mod dispatcher;
pub mod report;

pub use dispatcher::LifecycleDispatcher;
pub use report::{CollectingReporter, Failure, FailureReporter, Hook, TracingReporter};
