//! Configuration schema definitions.
//!
//! All types derive Serde traits so the same schema can be built from CLI
//! arguments or deserialized from a TOML file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default listen host for both modes.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port for both modes.
pub const DEFAULT_PORT: u16 = 5050;

/// Root configuration for the server.
///
/// Exactly one of `root` (single-root mode) or `mounts` (multi-root mode)
/// must be populated; `validation` enforces this.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Single-root mode: serve the whole URL space from this directory.
    pub root: Option<PathBuf>,

    /// Multi-root mode: ordered prefix-to-directory mounts. Unmatched
    /// request paths fall back to the process working directory.
    pub mounts: Vec<MountConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:5050").
    pub bind_address: String,

    /// Optional TLS configuration. When present, the listener terminates
    /// TLS before handing bytes to the HTTP layer.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: format!("{DEFAULT_HOST}:{DEFAULT_PORT}"),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

/// One URL-prefix to directory mapping.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MountConfig {
    /// URL path prefix (e.g., "/docs").
    pub prefix: String,

    /// Directory served under the prefix.
    pub directory: PathBuf,
}
