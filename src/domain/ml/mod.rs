pub mod feature_registry;
pub mod labeling;

pub use feature_registry::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, extract_features};
pub use labeling::{LabelPolicy, StrengthLabel, TierThresholds};
