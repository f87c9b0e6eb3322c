use crate::domain::ml::StrengthLabel;
use crate::domain::repositories::AnalysisRepository;
use crate::domain::types::{AnalysisResult, StoredAnalysis, split_lines};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

pub struct SqliteAnalysisRepository {
    pool: SqlitePool,
}

impl SqliteAnalysisRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<StoredAnalysis> {
        let strength: String = row.try_get("strength")?;
        let pros: String = row.try_get("pros")?;
        let cons: String = row.try_get("cons")?;

        Ok(StoredAnalysis {
            id: row.try_get("id")?,
            company: row.try_get("company")?,
            pros: split_lines(&pros),
            cons: split_lines(&cons),
            strength: strength
                .parse::<StrengthLabel>()
                .with_context(|| format!("Unknown strength label '{}' in storage", strength))?,
        })
    }
}

#[async_trait]
impl AnalysisRepository for SqliteAnalysisRepository {
    async fn upsert(&self, result: &AnalysisResult) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO company_analysis (company, pros, cons, strength)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(company) DO UPDATE SET
                pros = excluded.pros,
                cons = excluded.cons,
                strength = excluded.strength
            "#,
        )
        .bind(&result.identifier)
        .bind(result.pros_text())
        .bind(result.cons_text())
        .bind(result.label.as_str())
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to upsert analysis for {}", result.identifier))?;

        debug!("Persisted analysis for {}", result.identifier);
        Ok(())
    }

    async fn find_by_company(&self, company: &str) -> Result<Option<StoredAnalysis>> {
        let row = sqlx::query("SELECT * FROM company_analysis WHERE company = ?")
            .bind(company)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<StoredAnalysis>> {
        let rows = sqlx::query("SELECT * FROM company_analysis ORDER BY company ASC")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::map_row).collect()
    }

    async fn count(&self) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM company_analysis")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count as usize)
    }
}
