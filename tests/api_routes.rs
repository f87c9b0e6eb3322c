mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use company_strength::domain::insights::ProsCons;
use company_strength::domain::ml::StrengthLabel;
use company_strength::domain::repositories::AnalysisRepository;
use company_strength::domain::types::AnalysisResult;
use company_strength::infrastructure::InMemoryAnalysisRepository;
use company_strength::interfaces::{AppState, router};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;
use tower::ServiceExt;

async fn seeded_state(data_dir: &Path) -> AppState {
    let repo = Arc::new(InMemoryAnalysisRepository::new());
    repo.upsert(&AnalysisResult::new(
        "TCS",
        StrengthLabel::Strong,
        ProsCons {
            pros: vec!["Debt-free".to_string(), "Good ROE".to_string()],
            cons: vec!["Low dividend yield".to_string()],
        },
    ))
    .await
    .unwrap();
    repo.upsert(&AnalysisResult::new(
        "GHOST",
        StrengthLabel::Weak,
        ProsCons::default(),
    ))
    .await
    .unwrap();

    common::write_record(data_dir, "TCS", &common::record("TCS", 40.0, 12.0, 20.0, 100.0));

    AppState {
        repository: repo,
        data_dir: data_dir.to_path_buf(),
    }
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_list_companies() {
    let data = tempdir().unwrap();
    let (status, body) = get(seeded_state(data.path()).await, "/api/companies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": 2, "company": "GHOST", "strength": "Weak"},
            {"id": 1, "company": "TCS", "strength": "Strong"}
        ])
    );
}

#[tokio::test]
async fn test_company_detail_merges_record() {
    let data = tempdir().unwrap();
    let (status, body) = get(seeded_state(data.path()).await, "/api/companies/TCS").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company_name"], json!("TCS Ltd"));
    assert_eq!(body["roe_percentage"], json!(40.0));
    assert_eq!(body["strength"], json!("Strong"));
    assert_eq!(body["pros"], json!(["Debt-free", "Good ROE"]));
    assert_eq!(body["cons"], json!(["Low dividend yield"]));
}

#[tokio::test]
async fn test_unknown_company_is_404() {
    let data = tempdir().unwrap();
    let (status, body) = get(seeded_state(data.path()).await, "/api/companies/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Company not found"}));
}

#[tokio::test]
async fn test_missing_record_file_is_404() {
    let data = tempdir().unwrap();
    let (status, body) = get(seeded_state(data.path()).await, "/api/companies/GHOST").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Company JSON file not found"}));
}

#[tokio::test]
async fn test_corrupt_record_file_is_500() {
    let data = tempdir().unwrap();
    let state = seeded_state(data.path()).await;
    std::fs::write(data.path().join("TCS.json"), "{ broken").unwrap();

    let (status, body) = get(state, "/api/companies/TCS").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal Server Error"}));
}
