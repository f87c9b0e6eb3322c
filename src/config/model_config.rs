//! Labeling thresholds and random forest settings.

use super::{lookup_string, parse_or};
use crate::application::ml::TrainerParams;
use crate::domain::ml::{LabelPolicy, TierThresholds};
use tracing::warn;

/// Rule thresholds used to produce training labels
#[derive(Debug, Clone, PartialEq)]
pub struct LabelingEnvConfig {
    pub strong: TierThresholds,
    pub moderate: TierThresholds,
}

impl LabelingEnvConfig {
    pub fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LabelPolicy::default();
        let tier = |prefix: &str, base: TierThresholds| TierThresholds {
            roe: parse_or(lookup, &format!("{}_ROE", prefix), base.roe),
            sales_growth: parse_or(lookup, &format!("{}_SALES_GROWTH", prefix), base.sales_growth),
            profit_margin: parse_or(
                lookup,
                &format!("{}_PROFIT_MARGIN", prefix),
                base.profit_margin,
            ),
        };

        Self {
            strong: tier("LABEL_STRONG", defaults.strong),
            moderate: tier("LABEL_MODERATE", defaults.moderate),
        }
    }

    pub fn policy(&self) -> LabelPolicy {
        LabelPolicy {
            strong: self.strong,
            moderate: self.moderate,
        }
    }
}

/// Random forest and train/test split settings
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerEnvConfig {
    pub n_trees: u16,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub seed: u64,
    pub test_fraction: f64,
}

impl TrainerEnvConfig {
    pub fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = TrainerParams::default();

        let max_depth = match lookup_string(lookup, "MODEL_MAX_DEPTH") {
            None => defaults.max_depth,
            Some(raw) if raw.eq_ignore_ascii_case("none") => None,
            Some(raw) => match raw.parse::<u16>() {
                Ok(depth) if depth > 0 => Some(depth),
                _ => {
                    warn!("Ignoring invalid MODEL_MAX_DEPTH={:?}, trees are unbounded", raw);
                    defaults.max_depth
                }
            },
        };

        let mut test_fraction = parse_or(lookup, "MODEL_TEST_FRACTION", defaults.test_fraction);
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            warn!(
                "MODEL_TEST_FRACTION must be between 0 and 1, using {}",
                defaults.test_fraction
            );
            test_fraction = defaults.test_fraction;
        }

        Self {
            n_trees: parse_or(lookup, "MODEL_N_TREES", defaults.n_trees).max(1),
            max_depth,
            min_samples_split: parse_or(lookup, "MODEL_MIN_SAMPLES_SPLIT", defaults.min_samples_split)
                .max(2),
            seed: parse_or(lookup, "MODEL_SEED", defaults.seed),
            test_fraction,
        }
    }

    pub fn params(&self) -> TrainerParams {
        TrainerParams {
            n_trees: self.n_trees,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            test_fraction: self.test_fraction,
            seed: self.seed,
        }
    }
}
