//! Conforma demo server - validates JSON request bodies against static schemas
//!
//! Binds the demo validation endpoints and serves until interrupted.

mod config;
mod routes;
mod server;

use config::ServerConfig;
use server::HttpServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .compact()
        .init();

    let config = ServerConfig::from_env();
    if let Err(e) = HttpServer::with_config(config).start().await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
