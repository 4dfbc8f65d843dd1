//! Upstream API subsystem.
//!
//! # Data Flow
//! ```text
//! UpstreamRoute (routing/endpoints.rs)
//!     → Url built under the configured base
//!     → client.rs (single GET with fixed headers)
//!     → Ok(JSON bytes) or UpstreamError (types.rs)
//! ```
//!
//! # Design Decisions
//! - One client for the whole process; reqwest owns connection pooling
//! - No retries, no caching
//! - Status, transport and parse failures share one error type

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{UpstreamError, UpstreamResult};
