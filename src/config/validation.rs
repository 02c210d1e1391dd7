//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Exactly one serving mode selected (root vs. mounts)
//! - Mount prefixes well-formed and unique
//! - Served directories exist
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: `ServerConfig` → `Result<(), Vec<ValidationError>>`
//! - Runs before the config is accepted, whether it came from CLI or TOML

use std::collections::HashSet;
use std::net::ToSocketAddrs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("bind address {0:?} is not a valid listen address")]
    InvalidBindAddress(String),

    #[error("nothing to serve: configure a root directory or at least one mount")]
    NothingToServe,

    #[error("both a root directory and mounts are configured; pick one mode")]
    AmbiguousMode,

    #[error("mount prefix {0:?} must begin with '/'")]
    PrefixMissingSlash(String),

    #[error("duplicate mount prefix {0:?}")]
    DuplicatePrefix(String),

    #[error("{} does not exist or is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

/// Check a deserialized configuration for semantic problems.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Hostnames are allowed (`--host localhost`), so resolve rather
    // than parse.
    let resolves = config
        .listener
        .bind_address
        .to_socket_addrs()
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false);
    if !resolves {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match (&config.root, config.mounts.is_empty()) {
        (None, true) => errors.push(ValidationError::NothingToServe),
        (Some(_), false) => errors.push(ValidationError::AmbiguousMode),
        _ => {}
    }

    if let Some(root) = &config.root {
        check_directory(root, &mut errors);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for mount in &config.mounts {
        if !mount.prefix.starts_with('/') {
            errors.push(ValidationError::PrefixMissingSlash(mount.prefix.clone()));
        }
        if !seen.insert(mount.prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix(mount.prefix.clone()));
        }
        check_directory(&mount.directory, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_directory(path: &Path, errors: &mut Vec<ValidationError>) {
    if !path.is_dir() {
        errors.push(ValidationError::NotADirectory(path.to_path_buf()));
    }
}
