//! Rule-based strength labels used as training ground truth.
//!
//! The thresholds are policy, not fact: they encode one analyst's view of
//! what "strong" means and can be overridden through configuration.

use super::feature_registry::FeatureVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrengthLabel {
    Strong,
    Moderate,
    Weak,
}

impl StrengthLabel {
    pub const ALL: [StrengthLabel; 3] = [
        StrengthLabel::Strong,
        StrengthLabel::Moderate,
        StrengthLabel::Weak,
    ];

    /// Class index used by the classifier.
    pub fn class_id(&self) -> i32 {
        match self {
            StrengthLabel::Strong => 0,
            StrengthLabel::Moderate => 1,
            StrengthLabel::Weak => 2,
        }
    }

    pub fn from_class_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(StrengthLabel::Strong),
            1 => Some(StrengthLabel::Moderate),
            2 => Some(StrengthLabel::Weak),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Strong => "Strong",
            StrengthLabel::Moderate => "Moderate",
            StrengthLabel::Weak => "Weak",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrengthLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strong" => Ok(StrengthLabel::Strong),
            "moderate" => Ok(StrengthLabel::Moderate),
            "weak" => Ok(StrengthLabel::Weak),
            _ => anyhow::bail!("Invalid strength label: {}. Must be Strong, Moderate or Weak", s),
        }
    }
}

/// Minimums a company must strictly exceed to earn a tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub roe: f64,
    pub sales_growth: f64,
    pub profit_margin: f64,
}

impl TierThresholds {
    fn is_met_by(&self, features: &FeatureVector) -> bool {
        features.roe > self.roe
            && features.sales_growth > self.sales_growth
            && features.profit_margin > self.profit_margin
    }
}

/// Ordered labeling rules: Strong, then Moderate, otherwise Weak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPolicy {
    pub strong: TierThresholds,
    pub moderate: TierThresholds,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            strong: TierThresholds {
                roe: 15.0,
                sales_growth: 10.0,
                profit_margin: 10.0,
            },
            moderate: TierThresholds {
                roe: 8.0,
                sales_growth: 5.0,
                profit_margin: 5.0,
            },
        }
    }
}

impl LabelPolicy {
    pub fn label(&self, features: &FeatureVector) -> StrengthLabel {
        if self.strong.is_met_by(features) {
            StrengthLabel::Strong
        } else if self.moderate.is_met_by(features) {
            StrengthLabel::Moderate
        } else {
            StrengthLabel::Weak
        }
    }
}
