use super::predictor::StrengthPredictor;
use super::standardizer::Standardizer;
use crate::domain::errors::ModelError;
use crate::domain::ml::{FEATURE_NAMES, FeatureVector, StrengthLabel};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::RandomForestClassifier;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

pub type ForestClassifier = RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// What sits behind the scaler.
///
/// A forest needs at least two classes to fit; a corpus with a single
/// label gets a `Constant` model that always answers that label.
#[derive(Serialize, Deserialize)]
enum Classifier {
    Forest(ForestClassifier),
    Constant(StrengthLabel),
}

/// Fitted standardizer + classifier, persisted as one JSON artifact.
///
/// Immutable once built: the trainer creates it, batches only load it.
#[derive(Serialize, Deserialize)]
pub struct SmartCorePredictor {
    feature_names: Vec<String>,
    scaler: Standardizer,
    classifier: Classifier,
}

impl SmartCorePredictor {
    pub fn new(scaler: Standardizer, classifier: ForestClassifier) -> Self {
        Self::with_classifier(scaler, Classifier::Forest(classifier))
    }

    /// A model that predicts `label` for every input.
    pub fn constant(scaler: Standardizer, label: StrengthLabel) -> Self {
        Self::with_classifier(scaler, Classifier::Constant(label))
    }

    fn with_classifier(scaler: Standardizer, classifier: Classifier) -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
            scaler,
            classifier,
        }
    }

    /// The single label of a constant model, `None` for a forest.
    pub fn constant_label(&self) -> Option<StrengthLabel> {
        match self.classifier {
            Classifier::Constant(label) => Some(label),
            Classifier::Forest(_) => None,
        }
    }

    /// Loads a model written by [`SmartCorePredictor::save`].
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ModelError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;

        if model.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(ModelError::FeatureMismatch {
                expected: model.feature_names,
                actual: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
            });
        }

        info!("Successfully loaded strength model from {:?}", path);
        Ok(model)
    }

    /// Writes the model, replacing any previous artifact at `path`.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let io_err = |source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file = File::create(path).map_err(io_err)?;
        serde_json::to_writer(BufWriter::new(file), self).map_err(|source| ModelError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Model saved to {:?}", path);
        Ok(())
    }

    /// Predicts labels for many rows at once.
    pub fn predict_batch(&self, rows: &[FeatureVector]) -> Result<Vec<StrengthLabel>, ModelError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let forest = match &self.classifier {
            Classifier::Forest(forest) => forest,
            Classifier::Constant(label) => return Ok(vec![*label; rows.len()]),
        };

        let raw: Vec<_> = rows.iter().map(FeatureVector::to_array).collect();
        let scaled = self.scaler.transform(&raw);
        let matrix = DenseMatrix::from_2d_vec(&scaled)
            .map_err(|e| ModelError::Prediction(format!("Matrix creation failed: {}", e)))?;

        let classes = forest
            .predict(&matrix)
            .map_err(|e| ModelError::Prediction(e.to_string()))?;

        classes
            .into_iter()
            .map(|id| {
                StrengthLabel::from_class_id(id)
                    .ok_or_else(|| ModelError::Prediction(format!("Unknown class id {}", id)))
            })
            .collect()
    }
}

impl StrengthPredictor for SmartCorePredictor {
    fn predict(&self, features: &FeatureVector) -> Result<StrengthLabel, ModelError> {
        self.predict_batch(std::slice::from_ref(features))?
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::Prediction("No prediction returned".to_string()))
    }

    fn name(&self) -> &str {
        match self.classifier {
            Classifier::Forest(_) => "SmartCore Random Forest",
            Classifier::Constant(_) => "Constant label",
        }
    }
}
