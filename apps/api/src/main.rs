mod catalog;
mod config;
mod editor;
mod errors;
mod export;
mod layout;
mod models;
mod render;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::{A4PdfRenderer, ExportScheduler};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{load_or_fresh, FileRepository};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting vitae v{}", env!("CARGO_PKG_VERSION"));

    // Restore the saved resume, or start fresh and remember why
    let repository = Arc::new(FileRepository::new(&config.data_dir));
    info!("Resume storage: {}", repository.path().display());
    let (resume, storage_warning) = load_or_fresh(repository.as_ref()).await.into_parts();
    if let Some(reason) = &storage_warning {
        warn!("{reason}");
    }

    // Background PDF export, debounced behind edits
    let exports = ExportScheduler::new(Arc::new(A4PdfRenderer), config.export_debounce);
    info!(
        "Export debounce: {}ms",
        config.export_debounce.as_millis()
    );

    let state = AppState::new(resume, repository, exports, config.clone(), storage_warning);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // local single-user UI

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
