//! staku-results - race results upload and query service
//!
//! Serves the admin upload/wipe endpoints and the public listing endpoints
//! over a single SQLite database in the root folder.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use staku_common::config::{CliOverrides, ServiceConfig, TomlConfig};
use staku_common::db::init_database;
use staku_results::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for staku-results
#[derive(Parser, Debug)]
#[command(name = "staku-results")]
#[command(about = "Race results upload and query service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "STAKU_PORT")]
    port: Option<u16>,

    /// Root folder holding the database and upload staging area
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Config file (defaults to $STAKU_CONFIG, then the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staku_results=info,staku_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting staku-results v{}", env!("CARGO_PKG_VERSION"));

    let toml_config = TomlConfig::load_or_default(args.config.as_deref());
    let cli = CliOverrides {
        root_folder: args.root_folder,
        port: args.port,
    };
    let config = ServiceConfig::resolve(&cli, &toml_config).context("Invalid configuration")?;

    info!("Root folder: {}", config.root_folder.display());
    config
        .ensure_directories()
        .context("Failed to create root folder")?;

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());
    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    if config.atomic_uploads {
        info!("Uploads are inserted in a single transaction");
    } else {
        info!("Uploads are inserted row by row");
    }

    let state = AppState::from_config(pool.clone(), &config);
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("staku-results listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
