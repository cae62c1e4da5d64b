//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation source ("#/about/42" or "/app/about/42")
//!     → location.rs (strip prefix, normalize)
//!     → resolver.rs (split segments, apply fallbacks)
//!     → table.rs (closed route lookup)
//!     → Return: (route, param), always a valid route
//!
//! Table construction (at startup):
//!     RouterConfig.routes
//!     → RouteTable (checked default / not-found)
//!     → Freeze as immutable Arc<RouteTable>
//! ```
//!
//! # Design Decisions
//! - Route set is closed and known at startup
//! - Unknown names resolve to the not-found route, never an error
//! - Single optional parameter segment, no nested routes

pub mod location;
pub mod name;
pub mod resolver;
pub mod table;

pub use location::LocationFormat;
pub use name::{FragmentId, RouteName};
pub use resolver::{NavigationResolver, Resolution};
pub use table::{RouteEntry, RouteTable};
