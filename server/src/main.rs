//! thunt entity service
//!
//! Serves Mission and Hunt entities over HTTP from either process memory
//! or a SQLite database.
//!
//! Usage:
//!   thunt-server --port 8080 --backend sqlite --database thunt.db

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use clap::{Parser, ValueEnum};
use thunt_server::{BackendConfig, ServiceConfig, WriteFailurePolicy, default_registry};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// In-process maps; identifiers are random UUIDs
    Memory,
    /// SQLite file; identifiers are increasing integers
    Sqlite,
}

#[derive(Parser, Debug)]
#[command(name = "thunt-server")]
#[command(about = "CRUD service for treasure hunt missions and hunts")]
struct Args {
    /// HTTP port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Storage backend for every kind
    #[arg(long, value_enum, default_value_t = Backend::Memory)]
    backend: Backend,

    /// Database file for the sqlite backend
    #[arg(long, default_value = "thunt.db")]
    database: PathBuf,

    /// Exit the process when a write to the store fails instead of answering 503
    #[arg(long)]
    exit_on_store_failure: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            backend: match self.backend {
                Backend::Memory => BackendConfig::Memory,
                Backend::Sqlite => BackendConfig::Sqlite(self.database.clone()),
            },
            write_failure: if self.exit_on_store_failure {
                WriteFailurePolicy::Terminate
            } else {
                WriteFailurePolicy::Unavailable
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config = args.service_config();
    let registry = default_registry(&config).context("Failed to open storage backend")?;
    info!("Serving kinds: {}", registry.kinds().join(", "));
    let app = registry.into_app();

    let addr = SocketAddr::new(args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for ctrl-c: {}", err);
        std::future::pending::<()>().await;
    }
}
