//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use mapserve::config::schema::{ListenerConfig, MountConfig, ServerConfig, TlsConfig};
use mapserve::http::HttpServer;

/// Spawn a server for the given config and wait until it accepts
/// connections. Each test uses its own fixed port.
pub async fn spawn_server(config: ServerConfig) {
    let addr: SocketAddr = config.listener.bind_address.parse().unwrap();

    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        if let Err(e) = server.run().await {
            eprintln!("server error: {e}");
        }
    });

    wait_for(addr).await;
}

/// Poll until a TCP connection to `addr` succeeds.
pub async fn wait_for(addr: SocketAddr) {
    for _ in 0..100 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server at {addr} did not come up");
}

pub fn single_root_config(bind_address: &str, root: &Path) -> ServerConfig {
    ServerConfig {
        listener: ListenerConfig {
            bind_address: bind_address.to_string(),
            tls: None,
        },
        root: Some(root.to_path_buf()),
        mounts: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn multi_root_config(bind_address: &str, mounts: Vec<(&str, &Path)>) -> ServerConfig {
    ServerConfig {
        listener: ListenerConfig {
            bind_address: bind_address.to_string(),
            tls: None,
        },
        root: None,
        mounts: mounts
            .into_iter()
            .map(|(prefix, directory)| MountConfig {
                prefix: prefix.to_string(),
                directory: directory.to_path_buf(),
            })
            .collect(),
    }
}

#[allow(dead_code)]
pub fn tls_config(bind_address: &str, root: &Path) -> ServerConfig {
    let mut config = single_root_config(bind_address, root);
    config.listener.tls = Some(TlsConfig {
        cert_path: "tests/fixtures/cert.pem".into(),
        key_path: "tests/fixtures/key.pem".into(),
    });
    config
}
