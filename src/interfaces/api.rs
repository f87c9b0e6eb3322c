//! Read-only HTTP API over stored analyses.
//!
//! - `GET /api/companies` lists every stored row as `{id, company, strength}`.
//! - `GET /api/companies/:id` returns one row merged with the `company`
//!   section of `{data_dir}/{id}.json`.

use crate::domain::repositories::AnalysisRepository;
use crate::domain::types::StoredAnalysis;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn AnalysisRepository>,
    pub data_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct CompanySummary {
    pub id: i64,
    pub company: String,
    pub strength: String,
}

impl From<&StoredAnalysis> for CompanySummary {
    fn from(row: &StoredAnalysis) -> Self {
        Self {
            id: row.id,
            company: row.company.clone(),
            strength: row.strength.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(err) => {
                error!("Request failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/companies", get(list_companies))
        .route("/api/companies/:id", get(get_company))
        .with_state(state)
}

async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanySummary>>, ApiError> {
    let rows = state.repository.find_all().await?;
    Ok(Json(rows.iter().map(CompanySummary::from).collect()))
}

async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let row = state
        .repository
        .find_by_company(&id)
        .await?
        .ok_or(ApiError::NotFound("Company not found"))?;

    if !is_plain_identifier(&id) {
        return Err(ApiError::NotFound("Company JSON file not found"));
    }
    let json_path = state.data_dir.join(format!("{}.json", id));
    let raw = match tokio::fs::read_to_string(&json_path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound("Company JSON file not found"));
        }
        Err(e) => return Err(ApiError::Internal(e.into())),
    };
    let details: Value = serde_json::from_str(&raw)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("{}: {}", json_path.display(), e)))?;

    Ok(Json(merge_details(&row, &details)))
}

/// Row columns, then the record's company fields, then pros/cons as arrays.
fn merge_details(row: &StoredAnalysis, details: &Value) -> Value {
    let mut merged = Map::new();
    merged.insert("id".to_string(), json!(row.id));
    merged.insert("company".to_string(), json!(row.company));
    merged.insert("strength".to_string(), json!(row.strength.as_str()));

    if let Some(Value::Object(company)) = details.get("company") {
        for (key, value) in company {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged.insert("pros".to_string(), json!(row.pros));
    merged.insert("cons".to_string(), json!(row.cons));
    Value::Object(merged)
}

fn is_plain_identifier(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && !id.contains("..")
}
