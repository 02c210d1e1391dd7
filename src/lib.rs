//! Prefix-mapped static file server library.

pub mod cli;
pub mod config;
pub mod http;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use routing::resolver::PathResolver;
