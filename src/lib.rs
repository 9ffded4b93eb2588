pub mod catalog;
pub mod commands;
mod error;
pub mod merger;
pub mod settings;

pub use error::{CatalogError, ConfiguratorError};

use anyhow::{Context, Result};
use tracing::info;

use commands::{create_router, AppState};
use settings::Settings;

/// Initialise `tracing`. `RUST_LOG` wins over the configured filter.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}

/// Load settings and catalog, then serve HTTP until Ctrl+C.
pub async fn run() -> Result<()> {
    let settings = Settings::load()?;
    init_tracing(&settings.log_filter);

    let catalog = settings.catalog()?;
    info!(
        "Serving {} presets across {} component groups",
        catalog.list_presets().len(),
        catalog.list_component_groups().len()
    );

    let app = create_router(AppState::new(catalog));
    let listener = tokio::net::TcpListener::bind(settings.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind_address))?;
    info!("Listening on http://{}", settings.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
