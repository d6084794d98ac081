//! HTTP server library
//!
//! Serves the user routes over both stores, static assets and uploads.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod uploads;

use std::net::SocketAddr;

use tracing::info;

use user_service_lib::{Stores, UserServiceConfig};

use crate::config::ServerConfig;
use crate::routes::create_router;
use crate::state::AppState;
use crate::uploads::FileIntake;

/// Connect both stores and serve until SIGINT or SIGTERM.
pub async fn run(
    config: ServerConfig,
    store_config: UserServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Connect stores
    let stores = Stores::connect(&store_config).await?;
    info!(policy = %store_config.update_policy, "Connected to MySQL and MongoDB");

    // Create app state
    let users = stores.user_service(store_config.update_policy);
    let uploads = FileIntake::new(&config.uploads_dir, config.upload_naming);
    let state = AppState::new(users, uploads);

    // Build router
    let app = create_router(state, &config);

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    stores.shutdown().await?;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Cannot listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal, draining connections...");
}
