use crate::domain::types::AnalysisResult;
use anyhow::Result;
use async_trait::async_trait;

/// Destination for batch results.
///
/// A sink keeps exactly one result per identifier; the last write wins.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn record(&self, result: &AnalysisResult) -> Result<()>;

    /// Called once after the last record. Sinks that buffer write here.
    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
