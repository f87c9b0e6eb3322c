//! In-Memory Repository Implementation
//!
//! Thread-safe implementation of [`AnalysisRepository`] kept entirely in
//! process memory. Rows receive incrementing ids the way the SQLite table
//! assigns them, and an upsert keeps the id of the row it replaces.
//!
//! # Limitations
//!
//! - Data is lost on application restart
//! - No sharing across processes

use crate::domain::repositories::AnalysisRepository;
use crate::domain::types::{AnalysisResult, StoredAnalysis};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<String, StoredAnalysis>,
}

/// In-memory implementation of AnalysisRepository
#[derive(Clone, Default)]
pub struct InMemoryAnalysisRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryAnalysisRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn upsert(&self, result: &AnalysisResult) -> Result<()> {
        let mut guard = self.table.write().await;
        let table = &mut *guard;

        let id = match table.rows.get(&result.identifier) {
            Some(existing) => existing.id,
            None => {
                table.next_id += 1;
                table.next_id
            }
        };

        table.rows.insert(
            result.identifier.clone(),
            StoredAnalysis {
                id,
                company: result.identifier.clone(),
                pros: result.pros.clone(),
                cons: result.cons.clone(),
                strength: result.label,
            },
        );
        Ok(())
    }

    async fn find_by_company(&self, company: &str) -> Result<Option<StoredAnalysis>> {
        Ok(self.table.read().await.rows.get(company).cloned())
    }

    async fn find_all(&self) -> Result<Vec<StoredAnalysis>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.table.read().await.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::insights::ProsCons;
    use crate::domain::ml::StrengthLabel;

    #[tokio::test]
    async fn test_upsert_keeps_one_row_per_company() {
        let repo = InMemoryAnalysisRepository::new();

        let first = AnalysisResult::new(
            "X",
            StrengthLabel::Weak,
            ProsCons {
                pros: vec!["old".to_string()],
                cons: vec![],
            },
        );
        let second = AnalysisResult::new(
            "X",
            StrengthLabel::Moderate,
            ProsCons {
                pros: vec!["new".to_string()],
                cons: vec!["risk".to_string()],
            },
        );
        repo.upsert(&first).await.unwrap();
        repo.upsert(&second).await.unwrap();
        repo.upsert(&AnalysisResult::new("Y", StrengthLabel::Strong, ProsCons::default()))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        let x = repo.find_by_company("X").await.unwrap().unwrap();
        assert_eq!(x.id, 1);
        assert_eq!(x.strength, StrengthLabel::Moderate);
        assert_eq!(x.pros, vec!["new"]);
        assert_eq!(x.cons, vec!["risk"]);

        let y = repo.find_by_company("Y").await.unwrap().unwrap();
        assert_eq!(y.id, 2);
    }
}
