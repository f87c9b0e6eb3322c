use super::evaluation::ClassificationReport;
use super::smartcore_predictor::{ForestClassifier, SmartCorePredictor};
use super::split::train_test_split;
use super::standardizer::Standardizer;
use crate::domain::errors::TrainingError;
use crate::domain::ml::{FEATURE_COUNT, FeatureVector, StrengthLabel};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

/// Random forest and split settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerParams {
    pub n_trees: u16,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for TrainerParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// One labeled row of the training corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSample {
    pub identifier: String,
    pub features: FeatureVector,
    pub label: StrengthLabel,
}

pub struct TrainingOutcome {
    pub model: SmartCorePredictor,
    pub train_size: usize,
    pub test_size: usize,
    pub stratified: bool,
    pub report: ClassificationReport,
}

/// Splits, standardizes, fits and evaluates.
///
/// The scaler sees the train partition only. The held-out report is
/// diagnostic and does not decide whether the model is kept.
pub fn train(
    samples: &[TrainingSample],
    params: &TrainerParams,
) -> Result<TrainingOutcome, TrainingError> {
    if samples.len() < 2 {
        return Err(TrainingError::InsufficientData {
            samples: samples.len(),
        });
    }

    let labels: Vec<StrengthLabel> = samples.iter().map(|s| s.label).collect();
    let split = train_test_split(&labels, params.test_fraction, params.seed);
    if !split.stratified {
        warn!(
            "A class has fewer than 2 samples; using a non-stratified split of {} samples",
            samples.len()
        );
    }

    let rows = |idx: &[usize]| -> Vec<[f64; FEATURE_COUNT]> {
        idx.iter().map(|&i| samples[i].features.to_array()).collect()
    };
    let train_rows = rows(&split.train);
    let train_labels: BTreeSet<StrengthLabel> = split.train.iter().map(|&i| labels[i]).collect();
    let scaler = Standardizer::fit(&train_rows);

    let model = match train_labels.first() {
        Some(&only) if train_labels.len() == 1 => {
            warn!(
                "Train partition holds only {} samples; the model will always predict it",
                only
            );
            SmartCorePredictor::constant(scaler, only)
        }
        _ => fit_forest(scaler, &train_rows, &split.train, &labels, params)?,
    };

    let test_features: Vec<FeatureVector> =
        split.test.iter().map(|&i| samples[i].features).collect();
    let test_labels: Vec<StrengthLabel> = split.test.iter().map(|&i| labels[i]).collect();
    let predicted = model.predict_batch(&test_features)?;
    let report = ClassificationReport::from_predictions(&test_labels, &predicted);

    info!(
        "Held-out accuracy: {:.3} on {} samples",
        report.accuracy, report.samples
    );

    Ok(TrainingOutcome {
        model,
        train_size: split.train.len(),
        test_size: split.test.len(),
        stratified: split.stratified,
        report,
    })
}

fn fit_forest(
    scaler: Standardizer,
    train_rows: &[[f64; FEATURE_COUNT]],
    train_idx: &[usize],
    labels: &[StrengthLabel],
    params: &TrainerParams,
) -> Result<SmartCorePredictor, TrainingError> {
    let y_train: Vec<i32> = train_idx.iter().map(|&i| labels[i].class_id()).collect();
    let x_train = DenseMatrix::from_2d_vec(&scaler.transform(train_rows))
        .map_err(|e| TrainingError::Model(format!("Matrix error: {}", e)))?;

    let mut forest_params = RandomForestClassifierParameters::default()
        .with_n_trees(params.n_trees.into())
        .with_min_samples_split(params.min_samples_split)
        .with_seed(params.seed);
    if let Some(depth) = params.max_depth {
        forest_params = forest_params.with_max_depth(depth.into());
    }

    info!(
        "Fitting random forest: {} trees on {} samples",
        params.n_trees,
        train_idx.len()
    );
    let classifier: ForestClassifier = RandomForestClassifier::fit(&x_train, &y_train, forest_params)
        .map_err(|e| TrainingError::Model(format!("Training error: {}", e)))?;

    Ok(SmartCorePredictor::new(scaler, classifier))
}

/// Trains and writes the artifact, overwriting any previous one.
pub fn train_and_persist(
    samples: &[TrainingSample],
    params: &TrainerParams,
    model_path: &Path,
) -> Result<TrainingOutcome, TrainingError> {
    let outcome = train(samples, params)?;
    outcome.model.save(model_path)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ml::predictor::StrengthPredictor;
    use crate::domain::ml::LabelPolicy;

    fn sample(i: usize, roe: f64, growth: f64, margin: f64) -> TrainingSample {
        let features = FeatureVector {
            roe,
            sales_growth: growth,
            dividend_payout: (i % 7) as f64 * 5.0,
            profit_margin: margin,
            debt_to_equity: (i % 5) as f64 * 0.1,
        };
        TrainingSample {
            identifier: format!("C{}", i),
            features,
            label: LabelPolicy::default().label(&features),
        }
    }

    fn synthetic_corpus() -> Vec<TrainingSample> {
        let mut samples = Vec::new();
        for i in 0..20 {
            let jitter = i as f64 * 0.5;
            samples.push(sample(i, 25.0 + jitter, 20.0 + jitter, 18.0 + jitter));
            samples.push(sample(i + 20, 11.0 + jitter * 0.1, 7.0 + jitter * 0.1, 7.0 + jitter * 0.1));
            samples.push(sample(i + 40, 2.0 + jitter * 0.1, 1.0, 1.0 + jitter * 0.1));
        }
        samples
    }

    fn weak_samples(n: usize) -> Vec<TrainingSample> {
        synthetic_corpus()
            .into_iter()
            .filter(|s| s.label == StrengthLabel::Weak)
            .take(n)
            .collect()
    }

    fn small_params() -> TrainerParams {
        TrainerParams {
            n_trees: 15,
            ..Default::default()
        }
    }

    #[test]
    fn test_requires_two_samples() {
        let corpus = synthetic_corpus();
        let result = train(&corpus[..1], &small_params());
        assert!(matches!(
            result,
            Err(TrainingError::InsufficientData { samples: 1 })
        ));
        assert!(matches!(
            train(&[], &small_params()),
            Err(TrainingError::InsufficientData { samples: 0 })
        ));
    }

    #[test]
    fn test_trains_on_separable_corpus() {
        let corpus = synthetic_corpus();
        let outcome = train(&corpus, &small_params()).unwrap();

        assert!(outcome.stratified);
        assert_eq!(outcome.train_size + outcome.test_size, corpus.len());
        assert_eq!(outcome.test_size, 12);
        assert!(outcome.report.accuracy >= 0.75);

        let agree = corpus
            .iter()
            .filter(|s| outcome.model.predict(&s.features).unwrap() == s.label)
            .count();
        assert!(agree as f64 / corpus.len() as f64 >= 0.9);
    }

    #[test]
    fn test_training_is_reproducible() {
        let corpus = synthetic_corpus();
        let a = train(&corpus, &small_params()).unwrap();
        let b = train(&corpus, &small_params()).unwrap();
        let features: Vec<FeatureVector> = corpus.iter().map(|s| s.features).collect();
        assert_eq!(
            a.model.predict_batch(&features).unwrap(),
            b.model.predict_batch(&features).unwrap()
        );
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn test_tiny_corpus_falls_back_to_plain_split() {
        let corpus = synthetic_corpus();
        let tiny = vec![corpus[0].clone(), corpus[20].clone(), corpus[40].clone()];
        let outcome = train(&tiny, &small_params()).unwrap();
        assert!(!outcome.stratified);
        assert_eq!(outcome.train_size, 2);
        assert_eq!(outcome.test_size, 1);
    }

    #[test]
    fn test_two_sample_corpus_trains() {
        let pair = vec![weak_samples(1).remove(0), synthetic_corpus().remove(0)];
        assert_eq!(pair[0].label, StrengthLabel::Weak);
        assert_eq!(pair[1].label, StrengthLabel::Strong);

        let outcome = train(&pair, &TrainerParams::default()).unwrap();
        assert_eq!(outcome.train_size, 1);
        assert_eq!(outcome.test_size, 1);
        assert_eq!(outcome.report.samples, 1);

        let kept = outcome.model.constant_label().unwrap();
        assert!(pair.iter().any(|s| s.label == kept));
        assert_eq!(outcome.model.predict(&pair[0].features).unwrap(), kept);
        assert_eq!(outcome.model.predict(&pair[1].features).unwrap(), kept);
    }

    #[test]
    fn test_single_label_corpus_predicts_that_label() {
        let corpus = synthetic_corpus();
        let weak = weak_samples(6);
        assert_eq!(weak.len(), 6);

        let outcome = train(&weak, &TrainerParams::default()).unwrap();
        assert!(outcome.stratified);
        assert_eq!(outcome.train_size + outcome.test_size, 6);
        assert_eq!(outcome.model.constant_label(), Some(StrengthLabel::Weak));
        assert_eq!(outcome.report.accuracy, 1.0);
        assert_eq!(
            outcome.model.predict(&corpus[0].features).unwrap(),
            StrengthLabel::Weak
        );
    }

    #[test]
    fn test_constant_model_survives_save_and_load() {
        let corpus = synthetic_corpus();
        let weak = weak_samples(6);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("constant.json");

        train_and_persist(&weak, &TrainerParams::default(), &path).unwrap();
        let loaded = SmartCorePredictor::load(&path).unwrap();

        assert_eq!(loaded.constant_label(), Some(StrengthLabel::Weak));
        assert_eq!(loaded.name(), "Constant label");
        let features: Vec<FeatureVector> = corpus.iter().map(|s| s.features).collect();
        assert_eq!(
            loaded.predict_batch(&features).unwrap(),
            vec![StrengthLabel::Weak; corpus.len()]
        );
    }

    #[test]
    fn test_forest_model_has_no_constant_label() {
        let outcome = train(&synthetic_corpus(), &small_params()).unwrap();
        assert_eq!(outcome.model.constant_label(), None);
    }
}
