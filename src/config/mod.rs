//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI arguments ──┐
//!                 ├─→ schema.rs (one ServerConfig shape)
//! TOML file ──────┘       │
//!     (loader.rs)         ▼
//!                 validation.rs (semantic checks, all errors reported)
//!                         │
//!                         ▼
//!                 ServerConfig (validated, immutable)
//!                 passed by value into the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so a minimal TOML file works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, MountConfig, ServerConfig, TlsConfig};
pub use validation::{validate_config, ValidationError};
