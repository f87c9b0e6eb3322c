//! Trains the strength classifier on the records in the data directory.

use anyhow::Result;
use clap::Parser;
use company_strength::application::ml::{load_corpus, train_and_persist};
use company_strength::config::Config;
use company_strength::domain::ml::StrengthLabel;
use company_strength::infrastructure::observability::init_logging;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Train the company strength classifier", long_about = None)]
struct Args {
    /// Directory of per-company JSON records
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Path to output model file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Number of trees in the random forest
    #[arg(long)]
    n_trees: Option<u16>,

    /// Maximum depth of trees (unbounded when omitted)
    #[arg(long)]
    max_depth: Option<u16>,

    /// Fraction of samples held out for evaluation
    #[arg(long)]
    test_fraction: Option<f64>,

    /// Seed for the split and the forest
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let args = Args::parse();
    let config = Config::from_env()?;

    let data_dir = args.data_dir.unwrap_or(config.paths.data_dir);
    let model_path = args.output.unwrap_or(config.paths.model_path);

    let mut params = config.trainer.params();
    if let Some(n_trees) = args.n_trees {
        params.n_trees = n_trees.max(1);
    }
    if args.max_depth.is_some() {
        params.max_depth = args.max_depth;
    }
    if let Some(fraction) = args.test_fraction
        && fraction > 0.0
        && fraction < 1.0
    {
        params.test_fraction = fraction;
    }
    if let Some(seed) = args.seed {
        params.seed = seed;
    }

    let corpus = load_corpus(&data_dir, &config.labeling.policy())?;

    let mut distribution: BTreeMap<StrengthLabel, usize> = BTreeMap::new();
    for sample in &corpus.samples {
        *distribution.entry(sample.label).or_default() += 1;
    }
    for (label, count) in &distribution {
        info!("  {:<9} {}", label.as_str(), count);
    }

    let outcome = train_and_persist(&corpus.samples, &params, &model_path)?;

    println!("\n=== Training Results ===");
    println!("  Samples:    {} ({} skipped)", corpus.samples.len(), corpus.skipped);
    println!(
        "  Split:      {} train / {} test{}",
        outcome.train_size,
        outcome.test_size,
        if outcome.stratified { " (stratified)" } else { "" }
    );
    match outcome.model.constant_label() {
        Some(label) => println!("  Model:      constant ({} only)", label),
        None => println!("  Trees:      {}", params.n_trees),
    }
    println!("\n{}", outcome.report);
    println!("\nModel saved to {}", model_path.display());

    Ok(())
}
