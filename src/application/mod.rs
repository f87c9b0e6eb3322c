// Feature pipeline: training, evaluation and model inference
pub mod ml;

// Data directory enumeration and record decoding
pub mod record_source;

// Batch prediction and reporting
pub mod analysis_service;

pub use analysis_service::{AnalysisService, BatchSummary};
