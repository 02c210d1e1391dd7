//! Network layer.
//!
//! Listener binding lives with the HTTP server; this module holds TLS
//! material loading, so certificate problems surface at startup.

pub mod tls;

pub use tls::{load_tls_config, TlsError};
