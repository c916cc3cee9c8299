use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use expungement_decider::ExpungementService;
use expungement_decider::config::Config;
use expungement_decider::handlers::{AppState, router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let config = Config::load();

    let service = ExpungementService::new(&config).context("Failed to build completion client")?;
    let app = router(AppState::new(Arc::new(service)));

    let bind: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| {
            format!(
                "Invalid EXPUNGE_HTTP_BIND '{}' (expected host:port)",
                config.server.bind
            )
        })?;

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(
        %bind,
        model = %config.completion.model,
        provider = %config.completion.provider,
        export_dir = %config.export.dir.display(),
        "Starting {}",
        config.server.name
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
