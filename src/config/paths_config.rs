//! File locations and the storage URL.

use super::string_or;
use std::path::PathBuf;

/// Input, model and output paths
#[derive(Debug, Clone, PartialEq)]
pub struct PathsEnvConfig {
    pub data_dir: PathBuf,
    pub model_path: PathBuf,
    pub predictions_path: PathBuf,
}

impl PathsEnvConfig {
    pub fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            data_dir: string_or(lookup, "DATA_DIR", "data").into(),
            model_path: string_or(lookup, "MODEL_PATH", "model.json").into(),
            predictions_path: string_or(lookup, "PREDICTIONS_PATH", "predictions.json").into(),
        }
    }
}

/// Storage connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseEnvConfig {
    pub url: String,
}

impl DatabaseEnvConfig {
    pub fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            url: string_or(lookup, "DATABASE_URL", "sqlite://data/company_strength.db"),
        }
    }
}
