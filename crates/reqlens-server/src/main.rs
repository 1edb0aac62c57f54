//! reqlens server binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use reqlens_core::config::{CliOverrides, ReqlensConfig};
use reqlens_core::events::{EventDispatcher, TracingEventHandler};
use reqlens_server::{build_router, AppState};
use reqlens_storage::ReqStorageEngine;

#[derive(Parser, Debug)]
#[command(name = "reqlens")]
#[command(version, about = "Requirements analysis JSON API", long_about = None)]
struct Args {
    /// Directory searched for `reqlens.toml`.
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Socket address to listen on, e.g. 127.0.0.1:5000.
    #[arg(long)]
    bind: Option<String>,

    /// SQLite database file.
    #[arg(long)]
    db: Option<String>,

    #[arg(long)]
    read_pool_size: Option<usize>,

    /// tracing filter directive, e.g. `reqlens=debug`.
    #[arg(long)]
    log_filter: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind_address: self.bind.clone(),
            db_path: self.db.clone(),
            read_pool_size: self.read_pool_size,
            log_filter: self.log_filter.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ReqlensConfig::load(&args.config_dir, Some(&args.overrides()))
        .context("failed to load configuration")?;
    reqlens_core::tracing::init_tracing(Some(config.logging.effective_filter()));

    let db_path = config.storage.effective_db_path();
    let mut events = EventDispatcher::new();
    events.register(Arc::new(TracingEventHandler));
    let engine = ReqStorageEngine::open(&db_path, config.storage.effective_read_pool_size())
        .with_context(|| format!("failed to open database {}", db_path.display()))?
        .with_events(events);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, db = %db_path.display(), "reqlens listening");

    axum::serve(listener, build_router(AppState::new(engine)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("reqlens stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
