//! Read API over stored analyses.
//!
//! # Usage
//! ```sh
//! SERVER_PORT=5000 cargo run --bin server
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use company_strength::config::Config;
use company_strength::infrastructure::observability::init_logging;
use company_strength::infrastructure::{Database, SqliteAnalysisRepository};
use company_strength::interfaces::{AppState, router};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Serve stored company analyses over HTTP", long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Directory of per-company JSON records
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let args = Args::parse();
    let config = Config::from_env()?;

    let mut server = config.server.clone();
    if let Some(bind) = args.bind {
        server.bind_address = bind;
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    let data_dir = args.data_dir.unwrap_or(config.paths.data_dir);
    let database_url = args.database_url.unwrap_or(config.database.url);

    info!("Company strength API {} starting...", env!("CARGO_PKG_VERSION"));

    let db = Database::new(&database_url).await?;
    let state = AppState {
        repository: Arc::new(SqliteAnalysisRepository::new(db.pool.clone())),
        data_dir,
    };

    let address = server.socket_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on http://{}", address);

    let served = axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await
        .context("Server error");

    db.close().await;
    served
}
