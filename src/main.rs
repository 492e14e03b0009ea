/// API сервер дашборда

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use dispatch_dashboard::{
    api, DashboardConfig, DashboardState, JsonFileStore, KeyValueStore, MemoryStore, StateOptions,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env().context("failed to load config")?;

    // Инициализация логирования
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store: Arc<dyn KeyValueStore> = match &config.store_path {
        Some(path) => {
            tracing::info!("Settings file: {}", path.display());
            Arc::new(JsonFileStore::new(path))
        }
        None => Arc::new(MemoryStore::new()),
    };

    let dashboard = Arc::new(DashboardState::new(store, StateOptions::from(&config)));
    let app = api::router(Arc::clone(&dashboard));

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    tracing::info!("Server listening on http://{}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    dashboard.shutdown();
    tracing::info!("shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
