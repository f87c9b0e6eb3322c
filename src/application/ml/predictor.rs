use crate::domain::errors::ModelError;
use crate::domain::ml::{FeatureVector, LabelPolicy, StrengthLabel};

/// Interface for strength classifiers
pub trait StrengthPredictor: Send + Sync {
    /// Predict the strength label for one feature vector.
    /// Deterministic for a given model and input.
    fn predict(&self, features: &FeatureVector) -> Result<StrengthLabel, ModelError>;

    /// Get model name/type
    fn name(&self) -> &str;
}

/// The labeling rules themselves, used as a predictor.
///
/// Handy as a baseline and for running a batch without a trained model.
impl StrengthPredictor for LabelPolicy {
    fn predict(&self, features: &FeatureVector) -> Result<StrengthLabel, ModelError> {
        Ok(self.label(features))
    }

    fn name(&self) -> &str {
        "Threshold rules"
    }
}
