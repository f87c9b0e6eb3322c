//! Labels every record, derives pros/cons and upserts the results into
//! the `company_analysis` table.

use anyhow::Result;
use clap::Parser;
use company_strength::application::ml::SmartCorePredictor;
use company_strength::application::record_source::list_record_files;
use company_strength::application::{AnalysisService, BatchSummary};
use company_strength::config::Config;
use company_strength::domain::insights::InsightSource;
use company_strength::infrastructure::observability::init_logging;
use company_strength::infrastructure::{Database, RepositorySink, SqliteAnalysisRepository};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Store company strength analyses in the database", long_about = None)]
struct Args {
    /// Directory of per-company JSON records
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Trained model file
    #[arg(long)]
    model: Option<PathBuf>,

    /// Database URL, e.g. sqlite://data/company_strength.db
    #[arg(long)]
    database_url: Option<String>,

    /// Where pros/cons come from: `points` or `metrics`
    #[arg(long)]
    insight_source: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let args = Args::parse();
    let config = Config::from_env()?;

    let data_dir = args.data_dir.unwrap_or(config.paths.data_dir);
    let model_path = args.model.unwrap_or(config.paths.model_path);
    let database_url = args.database_url.unwrap_or(config.database.url);
    let insight_source = match args.insight_source.as_deref() {
        Some(raw) => InsightSource::from_str(raw)?,
        None => config.insight.source,
    };

    // Both must exist before the database is touched
    let files = list_record_files(&data_dir)?;
    let model = SmartCorePredictor::load(&model_path)?;

    let service = AnalysisService::new(Arc::new(model), config.insight.keywords, insight_source);

    let db = Database::new(&database_url).await?;
    let outcome = store_all(&service, &db, &files).await;
    db.close().await;

    match outcome {
        Ok(summary) => {
            info!(
                "Stored {} analyses ({} skipped, {} write failures)",
                summary.processed, summary.skipped, summary.write_failures
            );
            Ok(())
        }
        Err(e) => {
            error!("Storage batch failed: {:#}", e);
            Err(e)
        }
    }
}

async fn store_all(
    service: &AnalysisService,
    db: &Database,
    files: &[PathBuf],
) -> Result<BatchSummary> {
    let repository = Arc::new(SqliteAnalysisRepository::new(db.pool.clone()));
    let sink = RepositorySink::new(repository);
    service.run_batch(files, &sink).await
}
