mod routes;
mod singleton;
mod state;

use anyhow::{Context, Result};
use evcal_core::config::EvcalConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::singleton::InstanceLock;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = EvcalConfig::load().context("Failed to load configuration")?;
    let addr = config.server.addr();

    let _lock = InstanceLock::acquire_default(addr)?;
    let state = AppState::new(config.store.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state.clone())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let events = state.snapshot().await.len();
    tracing::info!(%addr, events, "evcal-server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
