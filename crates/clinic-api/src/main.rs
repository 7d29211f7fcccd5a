//! Clinic API server binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_api::{open_database, router, ApiConfig, AppState};

/// Starts the clinic API on the configured address (default: 0.0.0.0:8000).
///
/// Reads a `.env` file when present, then the `CLINIC_*` environment
/// variables documented on [`ApiConfig::from_env`]. `RUST_LOG` overrides the
/// default log directives.
///
/// # Errors
/// Returns an error if the configuration is invalid, the database cannot be
/// opened, the address cannot be bound, or the server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_api=info".parse()?)
                .add_directive("clinic_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    let db = open_database(&config)?;
    tracing::info!(path = %config.database_path, "Opened clinic database");

    let app = router(AppState::new(db), &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("-- Starting clinic API on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Clinic API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
