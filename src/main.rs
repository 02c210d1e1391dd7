//! mapserve: a local static file server that maps URL prefixes to
//! directories.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  MAPSERVE                    │
//!                      │                                              │
//!   Client Request     │  ┌──────────┐   ┌─────────┐   ┌───────────┐  │
//!   ───────────────────┼─▶│ listener │──▶│  http   │──▶│  routing  │  │
//!                      │  │ (tls?)   │   │ server  │   │ resolver  │  │
//!                      │  └──────────┘   └─────────┘   └─────┬─────┘  │
//!                      │                                     │        │
//!                      │                                     ▼        │
//!   Client Response    │                              ┌───────────┐   │
//!   ◀──────────────────┼──────────────────────────────│ tower-http│   │
//!                      │                              │ ServeFile │   │
//!                      │                              └───────────┘   │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! Two modes share one resolver core: `multi` mounts several directories
//! under URL prefixes with a working-directory fallback; `single` anchors
//! the whole URL space under one directory. Intended for local
//! development, not hardened for production traffic.

use clap::Parser;

use mapserve::cli::Cli;
use mapserve::http::HttpServer;
use mapserve::observability::logging;

#[tokio::main]
async fn main() {
    logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Usage problems exit 1; --help and --version exit 0.
            let code = match err.kind() {
                clap::error::ErrorKind::DisplayHelp
                | clap::error::ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    if let Err(err) = run(cli).await {
        tracing::error!(error = %err, "Fatal");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.command.into_config()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        "Configuration loaded"
    );
    if let Some(root) = &config.root {
        tracing::info!(root = %root.display(), "Serving single root");
    }
    for mount in &config.mounts {
        tracing::info!(
            prefix = %mount.prefix,
            directory = %mount.directory.display(),
            "Mount"
        );
    }

    let server = HttpServer::new(config)?;
    server.run().await?;

    Ok(())
}
