use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;

use ara_nlg_service::config::{load_catalog, Settings};
use ara_nlg_service::server::{create_app, AppState};
use ara_nlg_service::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing
    init_telemetry(&settings.telemetry)?;
    tracing::info!("Configuration loaded");

    // Load the response catalog once; it is read-only from here on
    let catalog = load_catalog(&settings.catalog.path)
        .with_context(|| format!("loading response catalog from {}", settings.catalog.path))?;

    // Create application state
    let state = AppState::new(settings.clone(), catalog);
    tracing::info!(
        unresolved_policy = ?settings.generator.unresolved_policy,
        seeded = settings.generator.seed.is_some(),
        "Generator initialized"
    );

    // Create Axum app
    let app = create_app(state);

    // Start server
    let addr = settings.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal_handler())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
