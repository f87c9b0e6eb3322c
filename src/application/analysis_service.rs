//! Batch prediction over a directory of company records.
//!
//! Records are processed one at a time in sorted file order. A record that
//! fails is logged and skipped, and so is a result the sink refuses; only
//! a failing `flush` aborts the batch.

use crate::application::ml::StrengthPredictor;
use crate::application::record_source::{LoadedRecord, load_record};
use crate::domain::errors::RecordError;
use crate::domain::insights::{InsightSource, KeywordPolicy, metric_insights};
use crate::domain::ml::extract_features;
use crate::domain::ports::ResultSink;
use crate::domain::types::AnalysisResult;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Counters reported at the end of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub write_failures: usize,
}

pub struct AnalysisService {
    predictor: Arc<dyn StrengthPredictor>,
    keywords: KeywordPolicy,
    insight_source: InsightSource,
}

impl AnalysisService {
    pub fn new(
        predictor: Arc<dyn StrengthPredictor>,
        keywords: KeywordPolicy,
        insight_source: InsightSource,
    ) -> Self {
        Self {
            predictor,
            keywords,
            insight_source,
        }
    }

    /// Predicts a label and derives pros/cons for one record.
    pub fn analyze(&self, loaded: &LoadedRecord) -> Result<AnalysisResult, RecordError> {
        let company = loaded.company()?;
        let features = extract_features(&loaded.record);

        let label = self
            .predictor
            .predict(&features)
            .map_err(|source| RecordError::Prediction {
                identifier: loaded.identifier.clone(),
                source,
            })?;

        let insights = match self.insight_source {
            InsightSource::Points => self.keywords.derive_pros_cons(&loaded.record.analysis.points),
            InsightSource::Metrics => metric_insights(company),
        };

        Ok(AnalysisResult::new(loaded.identifier.clone(), label, insights))
    }

    pub async fn run_batch(&self, files: &[PathBuf], sink: &dyn ResultSink) -> Result<BatchSummary> {
        let mut files = files.to_vec();
        files.sort();

        info!(
            "Analysing {} records with {} into {}",
            files.len(),
            self.predictor.name(),
            sink.name()
        );

        let mut summary = BatchSummary::default();
        for path in &files {
            let result = match load_record(path).and_then(|loaded| self.analyze(&loaded)) {
                Ok(result) => result,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    summary.skipped += 1;
                    continue;
                }
            };

            match sink.record(&result).await {
                Ok(()) => {
                    info!("Processed {} -> {}", result.identifier, result.label);
                    summary.processed += 1;
                }
                Err(e) => {
                    warn!("Failed to store result for {}: {:#}", result.identifier, e);
                    summary.write_failures += 1;
                }
            }
        }

        sink.flush()
            .await
            .with_context(|| format!("Failed to flush results to {}", sink.name()))?;

        info!(
            "Batch complete: {} processed, {} skipped, {} write failures",
            summary.processed, summary.skipped, summary.write_failures
        );
        Ok(summary)
    }
}
