//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags / environment variables
//!     → loader.rs (clap parse, map into schema)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared by value with the server at startup
//! ```
//!
//! # Design Decisions
//! - No config file; every knob has an env fallback
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow zero-config startup
//! - Validation separates syntactic (clap) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, Args, ConfigError};
pub use schema::ProxyConfig;
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, UpstreamConfig};
