//! Clinic billing API server
//!
//! Main entry point for the billing reconciliation service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_api::{AppState, create_router};
use clinic_core::BillingEngine;
use clinic_shared::AppConfig;
use clinic_store::InMemoryStores;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Ledgers and stores live in process memory
    let stores = InMemoryStores::new();
    let engine = BillingEngine::new(stores.stores(), &config.billing, &config.settings);
    info!(
        cashier_row_limit = config.billing.cashier_row_limit,
        currency = %config.settings.currency,
        "Billing engine ready"
    );

    let app = create_router(AppState::new(engine));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
