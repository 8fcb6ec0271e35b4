//! Notes Store Service — CRUD over plain-text notes kept as files.
//!
//! Each note is `<name>.txt` in the cache directory given on the command line.
//!
//! Usage: notes-store -h 127.0.0.1 -p 3000 -c ./cache

mod config;
mod error;
mod routes;
mod store;
mod upload_form;

use anyhow::Context;
use clap::Parser;
use config::{Args, Config};
use routes::AppState;
use std::sync::Arc;
use store::NoteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from(Args::parse());

    let store = NoteStore::new(&config.cache_dir);
    store
        .ensure_cache_dir()
        .await
        .with_context(|| format!("Failed to create cache directory {}", config.cache_dir.display()))?;

    let cache_path = tokio::fs::canonicalize(store.cache_dir())
        .await
        .unwrap_or_else(|_| config.cache_dir.clone());

    let state = Arc::new(AppState { store });
    let app = routes::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    log::info!("Server is running at http://{}", addr);
    log::info!("Cache directory: {}", cache_path.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Received Ctrl+C, shutting down...");
}
