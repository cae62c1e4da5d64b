//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → RouteTable / HttpFragmentSource built from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table is closed at startup
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{FetchConfig, NavigationConfig, NavigationMode, ObservabilityConfig, RouteConfig, RouterConfig};
