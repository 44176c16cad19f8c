//! Aggregation server binary.
//!
//! Binds the search endpoint and serves until interrupted. Credentials
//! come from the environment; the bind address from `BIND_ADDR`
//! (default `127.0.0.1:8080`).

use sporez_search::{server, AggregatorConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AggregatorConfig::from_env();
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%addr, error = %err, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "sporez-search listening");
    if let Err(err) = axum::serve(listener, server::router(config)).await {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }
}
