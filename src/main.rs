//! # HBNB API server
//!
//! Reads [`ApiConfig`] from the environment, starts the storage engine and serves the
//! REST API until Ctrl-C. See the library docs for the module tour.

use axum::extract::Request;
use axum::ServiceExt;
use hbnb_api::api;
use hbnb_api::config::ApiConfig;
use hbnb_api::lifecycle::{setup_tracing, HbnbSystem};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = ApiConfig::from_env()?;
    info!(?config, "Starting HBNB API");

    let system = HbnbSystem::start(&config).await?;
    let app = api::app(system.storage());

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl-C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
