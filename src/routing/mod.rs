//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path params, query)
//!     → axum router (http/server.rs) picks the handler
//!     → handler resolves an UpstreamRoute
//!     → endpoints.rs builds the upstream URL
//! ```
//!
//! # Design Decisions
//! - Route table is fixed at compile time
//! - URL construction is pure and unit-tested without network I/O
//! - One wildcard route forwards arbitrary upstream paths (no allow-list)

pub mod endpoints;

pub use endpoints::{Listing, UpstreamRoute};
