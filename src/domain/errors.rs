use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn one input file into a result. Never fatal to a batch.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No identifier could be derived from {}", path.display())]
    MissingIdentifier { path: PathBuf },

    #[error("Record {identifier} has no 'company' section")]
    MissingCompany { identifier: String },

    #[error("Prediction failed for {identifier}: {source}")]
    Prediction {
        identifier: String,
        #[source]
        source: ModelError,
    },
}

/// Errors related to fitting a model
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Insufficient data: need at least 2 samples, got {samples}")]
    InsufficientData { samples: usize },

    #[error("No usable training records found in {}", dir.display())]
    NoData { dir: PathBuf },

    #[error("Model error: {0}")]
    Model(String),

    #[error("Model artifact error: {0}")]
    Artifact(#[from] ModelError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Errors related to loading and running a persisted model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Model I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode model for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Model expects features {expected:?}, this build produces {actual:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Prediction failed: {0}")]
    Prediction(String),
}

/// Missing prerequisites that stop a run before it produces output
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{what} not found at {}", path.display())]
    MissingResource { what: &'static str, path: PathBuf },
}
