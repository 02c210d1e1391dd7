//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the axum Router and middleware stack
//! - Resolve request paths through the injected PathResolver
//! - Delegate file reads, content types, and status translation to
//!   tower-http's ServeFile
//! - Bind plain HTTP or TLS listeners and drive shutdown

use std::io;
use std::net::ToSocketAddrs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::{services::ServeFile, trace::TraceLayer};

use crate::config::schema::ServerConfig;
use crate::net::tls::{load_tls_config, TlsError};
use crate::routing::resolver::{Mount, PathResolver, Resolved, RouteTable};

/// Fatal startup and serving problems.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("could not determine working directory: {0}")]
    WorkingDir(io::Error),

    #[error("could not make {} absolute: {source}", path.display())]
    Absolutize { path: PathBuf, source: io::Error },

    #[error("could not bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error("server error: {0}")]
    Serve(io::Error),
}

/// Application state injected into the handler.
///
/// The resolver is built once and shared read-only; no other state exists.
#[derive(Clone)]
struct AppState {
    resolver: Arc<PathResolver>,
}

/// HTTP(S) static file server.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Build the resolver and router from a validated configuration.
    ///
    /// Mount directories are made absolute here, once; no symlink
    /// resolution is performed.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let resolver = build_resolver(&config)?;
        let state = AppState {
            resolver: Arc::new(resolver),
        };
        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(serve_handler))
            .route("/{*path}", any(serve_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured listener and serve until shutdown.
    pub async fn run(self) -> Result<(), ServerError> {
        let HttpServer { router, config } = self;
        let addr = config.listener.bind_address;

        match config.listener.tls {
            Some(tls) => {
                let rustls = load_tls_config(&tls.cert_path, &tls.key_path).await?;
                // axum-server wants a concrete SocketAddr; hostnames were
                // accepted by validation, so resolve here.
                let socket_addr = addr
                    .to_socket_addrs()
                    .map_err(|source| ServerError::Bind {
                        addr: addr.clone(),
                        source,
                    })?
                    .next()
                    .ok_or_else(|| ServerError::Bind {
                        addr: addr.clone(),
                        source: io::Error::new(io::ErrorKind::InvalidInput, "no address resolved"),
                    })?;

                tracing::info!(address = %socket_addr, "HTTPS server starting");
                axum_server::bind_rustls(socket_addr, rustls)
                    .serve(router.into_make_service())
                    .await
                    .map_err(ServerError::Serve)?;
            }
            None => {
                let listener =
                    TcpListener::bind(&addr)
                        .await
                        .map_err(|source| ServerError::Bind {
                            addr: addr.clone(),
                            source,
                        })?;
                let local_addr = listener.local_addr().map_err(ServerError::Serve)?;

                tracing::info!(address = %local_addr, "HTTP server starting");
                axum::serve(listener, router)
                    .with_graceful_shutdown(shutdown_signal())
                    .await
                    .map_err(ServerError::Serve)?;
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}

fn build_resolver(config: &ServerConfig) -> Result<PathResolver, ServerError> {
    if let Some(root) = &config.root {
        return Ok(PathResolver::single_root(absolutize(root)?));
    }

    let mounts = config
        .mounts
        .iter()
        .map(|m| {
            Ok(Mount {
                prefix: m.prefix.clone(),
                dir: absolutize(&m.directory)?,
            })
        })
        .collect::<Result<Vec<_>, ServerError>>()?;

    // Unmatched paths are served relative to the working directory,
    // captured once at startup so fallback resolution is deterministic.
    let fallback_root = std::env::current_dir().map_err(ServerError::WorkingDir)?;

    Ok(PathResolver::multi_root(
        RouteTable::new(mounts),
        fallback_root,
    ))
}

fn absolutize(path: &Path) -> Result<PathBuf, ServerError> {
    std::path::absolute(path).map_err(|source| ServerError::Absolutize {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the request path and hand the request to the file transport.
///
/// tower-http owns content types, range and conditional requests, HEAD,
/// and the translation of filesystem errors into 404/403/500.
async fn serve_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let raw_path = request.uri().path().to_string();
    let resolved = state.resolver.resolve(&raw_path);

    match &resolved {
        Resolved::Mounted { prefix, path } => tracing::debug!(
            request_path = %raw_path,
            prefix = %prefix,
            target = %path.display(),
            "Resolved via mount"
        ),
        Resolved::Fallback { path } => tracing::debug!(
            request_path = %raw_path,
            target = %path.display(),
            "Resolved via fallback root"
        ),
    }

    let mut target = resolved.into_path();

    // Directories serve their index.html, the transport default.
    let is_dir = tokio::fs::metadata(&target)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if is_dir {
        target.push("index.html");
    }

    match ServeFile::new(target).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(infallible) => match infallible {},
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
