//! Destinations for batch results.

use crate::domain::ml::StrengthLabel;
use crate::domain::ports::ResultSink;
use crate::domain::repositories::AnalysisRepository;
use crate::domain::types::AnalysisResult;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Collects identifier -> label and writes one pretty JSON object on flush.
///
/// A later result for the same identifier replaces the earlier one.
pub struct PredictionFile {
    path: PathBuf,
    name: String,
    predictions: Mutex<BTreeMap<String, StrengthLabel>>,
}

impl PredictionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: format!("prediction file {}", path.display()),
            path,
            predictions: Mutex::new(BTreeMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.predictions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.predictions.lock().await.is_empty()
    }
}

#[async_trait]
impl ResultSink for PredictionFile {
    async fn record(&self, result: &AnalysisResult) -> Result<()> {
        self.predictions
            .lock()
            .await
            .insert(result.identifier.clone(), result.label);
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        let predictions = self.predictions.lock().await;
        let body = serde_json::to_string_pretty(&*predictions)
            .context("Failed to encode predictions")?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, body)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        info!(
            "Wrote {} predictions to {}",
            predictions.len(),
            self.path.display()
        );
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Upserts every result into an [`AnalysisRepository`] as it arrives.
pub struct RepositorySink {
    repository: Arc<dyn AnalysisRepository>,
}

impl RepositorySink {
    pub fn new(repository: Arc<dyn AnalysisRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ResultSink for RepositorySink {
    async fn record(&self, result: &AnalysisResult) -> Result<()> {
        self.repository.upsert(result).await
    }

    fn name(&self) -> &str {
        "analysis table"
    }
}
