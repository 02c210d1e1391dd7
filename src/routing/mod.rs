//! Request path routing subsystem.
//!
//! # Data Flow
//! ```text
//! Raw request path (percent-encoded, starts with '/')
//!     → resolver.rs (decode once, prefix scan or single-root join)
//!     → Resolved: mounted target or fallback target
//!
//! Table construction (at startup):
//!     CLI / TOML mounts
//!     → directories made absolute
//!     → frozen as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table built at startup, immutable at runtime (thread-safe without locks)
//! - First match wins in declaration order (not longest prefix)
//! - Decoding happens exactly once, before matching

pub mod resolver;

pub use resolver::{Mount, PathResolver, Resolved, RouteTable};
