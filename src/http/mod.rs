//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (axum router, trace middleware)
//!     → routing resolver (URL path → filesystem path)
//!     → tower-http ServeFile (read, content type, 404/403/500)
//!     → Send to client
//! ```

pub mod server;

pub use server::{HttpServer, ServerError};
