//! Downloads one JSON record per company into the data directory.
//!
//! # Usage
//! ```sh
//! API_KEY=... cargo run --bin fetch -- --id-file company_id.csv
//! cargo run --bin fetch -- --ids TCS,INFY
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use company_strength::config::Config;
use company_strength::domain::errors::PipelineError;
use company_strength::infrastructure::CompanyApiClient;
use company_strength::infrastructure::observability::init_logging;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch company financial records", long_about = None)]
struct Args {
    /// Company identifiers to fetch (comma separated); overrides --id-file
    #[arg(long, value_delimiter = ',')]
    ids: Vec<String>,

    /// CSV file with a `company_id` column
    #[arg(long)]
    id_file: Option<PathBuf>,

    /// Directory the records are written to
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Pause between requests in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let args = Args::parse();
    let config = Config::from_env()?;

    let data_dir = args.data_dir.unwrap_or(config.paths.data_dir);
    let delay = Duration::from_millis(args.delay_ms.unwrap_or(config.fetch.delay_ms));

    let ids: Vec<String> = if args.ids.is_empty() {
        let id_file = args.id_file.unwrap_or(config.fetch.company_id_file);
        read_company_ids(&id_file)?
    } else {
        args.ids
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect()
    };

    if config.fetch.api_key.is_empty() {
        warn!("API_KEY is not set; requests will likely be rejected");
    }

    tokio::fs::create_dir_all(&data_dir)
        .await
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    let client = CompanyApiClient::new(&config.fetch.base_url, &config.fetch.api_key);
    let mut saved = 0usize;
    let mut failed = 0usize;

    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(delay).await;
        }
        info!("Fetching data for {}...", id);

        match fetch_one(&client, &data_dir, id).await {
            Ok(true) => saved += 1,
            Ok(false) => failed += 1,
            Err(e) => {
                warn!("Failed to fetch {}: {:#}", id, e);
                failed += 1;
            }
        }
    }

    info!(
        "Fetch complete: {} saved, {} failed, {} requested",
        saved,
        failed,
        ids.len()
    );
    Ok(())
}

async fn fetch_one(client: &CompanyApiClient, data_dir: &Path, id: &str) -> Result<bool> {
    if id.contains(['/', '\\']) || id.contains("..") {
        warn!("Skipping company id {:?}: not usable as a file name", id);
        return Ok(false);
    }

    let Some(payload) = client.fetch(id).await? else {
        return Ok(false);
    };

    let path = data_dir.join(format!("{}.json", id));
    let body = serde_json::to_string_pretty(&payload)?;
    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved {}", path.display());
    Ok(true)
}

fn read_company_ids(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(PipelineError::MissingResource {
            what: "Company id file",
            path: path.to_path_buf(),
        }
        .into());
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == "company_id")
        .with_context(|| format!("{} has no company_id column", path.display()))?;

    let mut ids = Vec::new();
    for row in reader.records() {
        let row = row.with_context(|| format!("Malformed row in {}", path.display()))?;
        if let Some(id) = row.get(column).map(str::trim)
            && !id.is_empty()
        {
            ids.push(id.to_string());
        }
    }

    info!("Loaded {} company ids from {}", ids.len(), path.display());
    Ok(ids)
}
