//! Bakery storefront backend.
//!
//! Persists cake listings with uploaded images, accepts customer orders
//! against those listings, and tracks each order through the single manual
//! `Pending → Delivered` transition.
//!
//! The handlers are thin and stateless: every operation is one or two calls
//! against the injected [`storage`] backend, plus a disk write for the image
//! upload on cake creation. State lives exclusively in the store; nothing is
//! cached between requests.
//!
//! # Storage backends
//!
//! - in-memory (default feature `in-memory`) for development and tests
//! - MongoDB behind the `mongodb_backend` feature flag
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=info cargo run
//! cargo run --no-default-features --features mongodb_backend
//! ```

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod storage;
pub mod uploads;

use config::AppConfig;
use state::AppState;
use storage::{CakeStore, OrderStore};
use uploads::ImageStore;

/// Load configuration, wire up the configured storage backend, and serve the
/// API until a shutdown signal arrives.
pub async fn start_server() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Arc::new(AppConfig::load());

    let images = ImageStore::new(config.upload_dir.clone());
    images.ensure_dir().await?;

    let (cakes, orders) = build_stores(&config).await?;
    let state = AppState {
        cakes,
        orders,
        images,
        config: config.clone(),
    };

    let app = routes::app_router(state);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

#[cfg(feature = "mongodb_backend")]
async fn build_stores(config: &AppConfig) -> Result<(Arc<dyn CakeStore>, Arc<dyn OrderStore>)> {
    use storage::{MongoCakeStore, MongoOrderStore};

    let client = mongodb::Client::with_uri_str(&config.mongo_uri).await?;
    let database = client.database(&config.mongo_db);
    info!("MongoDB connected");

    Ok((
        Arc::new(MongoCakeStore::new(database.clone())),
        Arc::new(MongoOrderStore::new(database)),
    ))
}

#[cfg(not(feature = "mongodb_backend"))]
async fn build_stores(_config: &AppConfig) -> Result<(Arc<dyn CakeStore>, Arc<dyn OrderStore>)> {
    use storage::{InMemoryCakeStore, InMemoryOrderStore};

    Ok((
        Arc::new(InMemoryCakeStore::new()),
        Arc::new(InMemoryOrderStore::new()),
    ))
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
