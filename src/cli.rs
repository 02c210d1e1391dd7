//! Command-line interface.
//!
//! All three subcommands produce the same validated [`ServerConfig`] the
//! TOML loader does.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::{
    ListenerConfig, MountConfig, ServerConfig, TlsConfig, DEFAULT_HOST, DEFAULT_PORT,
};
use crate::config::validation::validate_config;

/// Local static file server mapping URL prefixes to directories.
#[derive(Debug, Parser)]
#[command(name = "mapserve", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve several directories, each mounted under a URL prefix.
    ///
    /// Listens on 127.0.0.1:5050. Requests that match no prefix are
    /// served relative to the current working directory.
    Multi(MultiArgs),

    /// Serve one directory as the whole URL space.
    Single(SingleArgs),

    /// Load listener and mount settings from a TOML file.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct MultiArgs {
    /// Mounts of the form /prefix=/path/to/dir; first match wins.
    #[arg(value_name = "PREFIX=DIR", required = true)]
    pub mounts: Vec<MountSpec>,

    #[command(flatten)]
    pub tls: TlsArgs,
}

#[derive(Debug, Args)]
pub struct SingleArgs {
    /// Directory to serve.
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Host to listen on.
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[command(flatten)]
    pub tls: TlsArgs,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// HTTPS is enabled when both files are given; clap rejects one without
/// the other.
#[derive(Debug, Args)]
pub struct TlsArgs {
    /// PEM certificate file.
    #[arg(long, value_name = "FILE", requires = "key")]
    pub cert: Option<PathBuf>,

    /// PEM private key file.
    #[arg(long, value_name = "FILE", requires = "cert")]
    pub key: Option<PathBuf>,
}

impl TlsArgs {
    fn into_config(self) -> Option<TlsConfig> {
        match (self.cert, self.key) {
            (Some(cert_path), Some(key_path)) => Some(TlsConfig {
                cert_path,
                key_path,
            }),
            _ => None,
        }
    }
}

/// One `/prefix=/path/to/dir` mount argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    pub prefix: String,
    pub directory: PathBuf,
}

impl FromStr for MountSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, directory) = s
            .split_once('=')
            .ok_or_else(|| format!("expected PREFIX=DIR, got {s:?}"))?;
        if prefix.is_empty() {
            return Err(format!("empty prefix in {s:?}"));
        }
        Ok(MountSpec {
            prefix: prefix.to_string(),
            directory: PathBuf::from(directory),
        })
    }
}

impl Command {
    /// Build the effective, validated server configuration.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let config = match self {
            Command::Config(args) => return load_config(&args.file),
            Command::Multi(args) => ServerConfig {
                listener: ListenerConfig {
                    tls: args.tls.into_config(),
                    ..ListenerConfig::default()
                },
                root: None,
                mounts: args
                    .mounts
                    .into_iter()
                    .map(|m| MountConfig {
                        prefix: m.prefix,
                        directory: m.directory,
                    })
                    .collect(),
            },
            Command::Single(args) => ServerConfig {
                listener: ListenerConfig {
                    bind_address: format!("{}:{}", args.host, args.port),
                    tls: args.tls.into_config(),
                },
                root: Some(args.directory),
                mounts: Vec::new(),
            },
        };

        validate_config(&config).map_err(ConfigError::Validation)?;

        Ok(config)
    }
}
