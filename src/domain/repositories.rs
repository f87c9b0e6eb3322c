//! Repository Pattern Abstractions
//!
//! This module defines the repository trait for analysis persistence,
//! keeping batch logic independent of the storage engine.
//!
//! # Design
//!
//! `AnalysisRepository` stores one row per company identifier. Writing
//! the same identifier again replaces its pros, cons and strength.
//!
//! # Implementations
//!
//! - `SqliteAnalysisRepository`: production storage through `sqlx`
//! - `InMemoryAnalysisRepository`: tests and dry runs
//!
//! # Example
//!
//! ```rust,no_run
//! use company_strength::domain::repositories::AnalysisRepository;
//! use company_strength::infrastructure::InMemoryAnalysisRepository;
//!
//! # async {
//! let repo = InMemoryAnalysisRepository::new();
//! // repo.upsert(&result).await?;
//! // let row = repo.find_by_company("TCS").await?;
//! # };
//! ```

use crate::domain::types::{AnalysisResult, StoredAnalysis};
use anyhow::Result;
use async_trait::async_trait;

/// Repository for persisting and retrieving company analyses
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Insert the result, or overwrite the existing row for its identifier
    async fn upsert(&self, result: &AnalysisResult) -> Result<()>;

    /// Find the row for one company identifier
    async fn find_by_company(&self, company: &str) -> Result<Option<StoredAnalysis>>;

    /// All rows, ordered by company identifier
    async fn find_all(&self) -> Result<Vec<StoredAnalysis>>;

    /// Count stored rows
    async fn count(&self) -> Result<usize>;
}
