//! Dynamath API server entry point.

use std::error::Error;
use std::sync::Arc;

use dynamath_api::config::ServerConfig;
use dynamath_api::router;
use dynamath_api::state::AppState;
use dynamath_core::clock::SystemClock;
use dynamath_core::seed::{OsSalt, ReviewSeedResolver};
use dynamath_core::storage::select_store;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Dynamath API server");

    let config = ServerConfig::from_env()?;

    // The server has no browser storage, so review seeds live in memory.
    let store = select_store(None, None);
    tracing::info!(tier = ?store.tier, "selected seed store");
    let resolver = ReviewSeedResolver::new(store, Arc::new(SystemClock::new()), Arc::new(OsSalt));
    let app_state = AppState::with_builtin_templates(resolver)?;

    let app = router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
