//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router, loader, lifecycle produce:
//!     → tracing events (route, fragment, navigation id fields)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → logging.rs subscriber (binary)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Each navigation runs in a span carrying a navigation id
//! - Hook and load failures are always logged, even when reported elsewhere

pub mod logging;
pub mod metrics;
