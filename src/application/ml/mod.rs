pub mod corpus;
pub mod evaluation;
pub mod predictor;
pub mod smartcore_predictor;
pub mod split;
pub mod standardizer;
pub mod trainer;

pub use corpus::{Corpus, load_corpus};
pub use evaluation::{ClassMetrics, ClassificationReport};
pub use predictor::StrengthPredictor;
pub use smartcore_predictor::SmartCorePredictor;
pub use trainer::{TrainerParams, TrainingOutcome, TrainingSample, train, train_and_persist};
