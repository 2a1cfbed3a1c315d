//! ftv-web - Worker verification portal and dashboard service
//!
//! Loads the worker table once at startup, then serves the public
//! verification API and the passkey-gated dashboard API from the in-memory
//! collection.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use ftv_common::config::{Cli, ServerConfig};
use ftv_common::store::WorkerStore;
use ftv_web::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting FTV worker verification portal (ftv-web) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();
    let config = ServerConfig::load(&cli)?;

    let store = WorkerStore::new(&config.store_url, &config.store_api_key, &config.store_table)?;

    // Best-effort full load; the service still starts on a partial result,
    // it just serves fewer records until restarted
    let outcome = store.load_all().await;
    if !outcome.complete {
        warn!(
            loaded = outcome.records.len(),
            "Worker table load was incomplete; verification and dashboard views are partial"
        );
    }

    // Cross-check against the store's exact count to make a short load visible
    match store.count(None, None).await {
        Ok(total) if total as usize == outcome.records.len() => {
            info!(total, "✓ Loaded complete worker table");
        }
        Ok(total) => {
            warn!(
                total,
                loaded = outcome.records.len(),
                "Loaded row count differs from store count"
            );
        }
        Err(e) => {
            warn!(error = %e, "Could not fetch store row count");
        }
    }

    let listen = config.listen.clone();
    let state = AppState::new(outcome.records, store, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("ftv-web listening on http://{}", listen);
    info!("Health check: http://{}/health", listen);

    axum::serve(listener, app).await?;

    Ok(())
}
