//! Labels every record with the trained model and writes
//! `{identifier: label}` as one JSON object.

use anyhow::Result;
use clap::Parser;
use company_strength::application::AnalysisService;
use company_strength::application::ml::SmartCorePredictor;
use company_strength::application::record_source::list_record_files;
use company_strength::config::Config;
use company_strength::infrastructure::PredictionFile;
use company_strength::infrastructure::observability::init_logging;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Predict company strength labels to a JSON file", long_about = None)]
struct Args {
    /// Directory of per-company JSON records
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Trained model file
    #[arg(long)]
    model: Option<PathBuf>,

    /// Output JSON file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let args = Args::parse();
    let config = Config::from_env()?;

    let data_dir = args.data_dir.unwrap_or(config.paths.data_dir);
    let model_path = args.model.unwrap_or(config.paths.model_path);
    let output = args.output.unwrap_or(config.paths.predictions_path);

    // Both must exist before anything is written
    let files = list_record_files(&data_dir)?;
    let model = SmartCorePredictor::load(&model_path)?;

    let service = AnalysisService::new(
        Arc::new(model),
        config.insight.keywords,
        config.insight.source,
    );
    let sink = PredictionFile::new(&output);
    let summary = service.run_batch(&files, &sink).await?;

    info!(
        "Predictions saved to {} ({} companies, {} skipped)",
        output.display(),
        summary.processed,
        summary.skipped
    );
    Ok(())
}
