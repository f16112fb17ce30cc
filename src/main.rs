use crate::config::{load_config, VERSION};
use axum::Extension;
use log::{error, info};
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};

mod config;
mod database;
mod logging;
mod routes;
mod services;
mod utils;

#[tokio::main]
async fn main() {
    // Load configuration
    let config = Arc::new(load_config().unwrap_or_default());

    // Initialize logging
    logging::setup(config.logging, &config.logging_dir);

    info!("Starting Chess League Server v{}", VERSION);

    // Connect to the database and apply migrations
    let db = database::init(&config).await;
    let credentials = config.passwords.store();

    let router = routes::router()
        .layer(Extension(db))
        .layer(Extension(credentials))
        .layer(Extension(config.clone()));

    let addr = SocketAddr::new(config.host, config.port);
    let listener = match TcpListener::bind(addr).await {
        Ok(value) => value,
        Err(err) => {
            error!("Failed to bind HTTP server on {}: {:?}", addr, err);
            return;
        }
    };

    info!("Started HTTP server on {}", addr);

    if let Err(err) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Error within HTTP server: {:?}", err);
    }
}

/// Completes once Ctrl-C is pressed. Never completes if the signal
/// can't be listened for.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {:?}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
