mod common;

use company_strength::application::AnalysisService;
use company_strength::application::ml::{SmartCorePredictor, TrainerParams, load_corpus, train};
use company_strength::application::record_source::list_record_files;
use company_strength::domain::insights::{InsightSource, KeywordPolicy};
use company_strength::domain::ml::{LabelPolicy, StrengthLabel};
use company_strength::domain::repositories::AnalysisRepository;
use company_strength::infrastructure::{
    Database, PredictionFile, RepositorySink, SqliteAnalysisRepository,
};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::tempdir;

fn rules_service(source: InsightSource) -> AnalysisService {
    AnalysisService::new(
        Arc::new(LabelPolicy::default()),
        KeywordPolicy::default(),
        source,
    )
}

#[tokio::test]
async fn test_store_batch_is_idempotent() {
    let data = tempdir().unwrap();
    common::write_record(data.path(), "TCS", &common::record("TCS", 30.0, 15.0, 20.0, 100.0));
    common::write_record(data.path(), "ITC", &common::record("ITC", 10.0, 6.0, 7.0, 100.0));
    common::write_record(data.path(), "IDEA", &common::record("IDEA", -5.0, 1.0, -3.0, 100.0));
    common::write_record(data.path(), "NOCO", &json!({"analysis": {"points": ["Good growth"]}}));
    std::fs::write(data.path().join("GARBAGE.json"), "not json at all").unwrap();

    let db_dir = tempdir().unwrap();
    let url = format!("sqlite://{}", db_dir.path().join("analysis.db").display());
    let db = Database::new(&url).await.unwrap();
    let repo = Arc::new(SqliteAnalysisRepository::new(db.pool.clone()));
    let sink = RepositorySink::new(repo.clone());

    let files = list_record_files(data.path()).unwrap();
    let service = rules_service(InsightSource::Points);

    let first = service.run_batch(&files, &sink).await.unwrap();
    assert_eq!(first.processed, 3);
    assert_eq!(first.skipped, 2);
    assert_eq!(first.write_failures, 0);
    let snapshot = repo.find_all().await.unwrap();

    let second = service.run_batch(&files, &sink).await.unwrap();
    assert_eq!(second, first);
    assert_eq!(repo.count().await.unwrap(), 3);
    assert_eq!(repo.find_all().await.unwrap(), snapshot);

    let tcs = repo.find_by_company("TCS").await.unwrap().unwrap();
    assert_eq!(tcs.strength, StrengthLabel::Strong);
    assert_eq!(tcs.pros, vec!["Company has good return on equity"]);
    assert_eq!(tcs.cons, vec!["Working capital is under pressure"]);

    let itc = repo.find_by_company("ITC").await.unwrap().unwrap();
    assert_eq!(itc.strength, StrengthLabel::Moderate);
    let idea = repo.find_by_company("IDEA").await.unwrap().unwrap();
    assert_eq!(idea.strength, StrengthLabel::Weak);
    assert!(repo.find_by_company("NOCO").await.unwrap().is_none());

    db.close().await;
}

#[tokio::test]
async fn test_switching_insight_source_overwrites_rows() {
    let data = tempdir().unwrap();
    common::write_record(data.path(), "TCS", &common::record("TCS", 30.0, 15.0, 20.0, 100.0));
    let files = list_record_files(data.path()).unwrap();

    let db = Database::new("sqlite::memory:").await.unwrap();
    let repo = Arc::new(SqliteAnalysisRepository::new(db.pool.clone()));
    let sink = RepositorySink::new(repo.clone());

    rules_service(InsightSource::Points)
        .run_batch(&files, &sink)
        .await
        .unwrap();
    rules_service(InsightSource::Metrics)
        .run_batch(&files, &sink)
        .await
        .unwrap();

    assert_eq!(repo.count().await.unwrap(), 1);
    let row = repo.find_by_company("TCS").await.unwrap().unwrap();
    assert_eq!(
        row.pros,
        vec![
            "Company has a strong Return on Equity (ROE) of 30.0%.",
            "Company shows excellent Return on Capital Employed (ROCE) of 32.0%.",
        ]
    );
    assert_eq!(row.cons, vec!["No major weaknesses detected."]);
}

#[tokio::test]
async fn test_prediction_file_with_trained_model() {
    let data = tempdir().unwrap();
    common::write_tiered_corpus(data.path());
    common::write_record(data.path(), "NOCO", &json!({"analysis": {}}));

    let corpus = load_corpus(data.path(), &LabelPolicy::default()).unwrap();
    let params = TrainerParams {
        n_trees: 20,
        ..Default::default()
    };
    let out = tempdir().unwrap();
    let model_path = out.path().join("model.json");
    train(&corpus.samples, &params)
        .unwrap()
        .model
        .save(&model_path)
        .unwrap();
    let model = SmartCorePredictor::load(&model_path).unwrap();

    let service = AnalysisService::new(
        Arc::new(model),
        KeywordPolicy::default(),
        InsightSource::Points,
    );
    let output = out.path().join("predictions.json");
    let sink = PredictionFile::new(&output);
    let files = list_record_files(data.path()).unwrap();
    let summary = service.run_batch(&files, &sink).await.unwrap();
    assert_eq!(summary.processed, 90);
    assert_eq!(summary.skipped, 1);

    let written: BTreeMap<String, Value> =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.len(), 90);
    assert!(!written.contains_key("NOCO"));
    assert!(
        written
            .values()
            .all(|v| matches!(v.as_str(), Some("Strong" | "Moderate" | "Weak")))
    );
}
