use crate::domain::ml::StrengthLabel;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: StrengthLabel,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true samples of this class.
    pub support: usize,
}

/// Held-out diagnostics. Never used to gate persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub samples: usize,
    pub per_class: Vec<ClassMetrics>,
}

impl ClassificationReport {
    /// Builds the report from aligned truth/prediction slices.
    /// Classes that appear in neither slice are omitted.
    pub fn from_predictions(actual: &[StrengthLabel], predicted: &[StrengthLabel]) -> Self {
        let samples = actual.len().min(predicted.len());
        let pairs = || actual.iter().zip(predicted.iter());

        let correct = pairs().filter(|(a, p)| a == p).count();
        let accuracy = if samples > 0 {
            correct as f64 / samples as f64
        } else {
            0.0
        };

        let per_class = StrengthLabel::ALL
            .iter()
            .filter_map(|&label| {
                let tp = pairs().filter(|(a, p)| **a == label && **p == label).count();
                let fp = pairs().filter(|(a, p)| **a != label && **p == label).count();
                let fn_ = pairs().filter(|(a, p)| **a == label && **p != label).count();
                let support = tp + fn_;
                if support == 0 && fp == 0 {
                    return None;
                }

                let precision = safe_div(tp, tp + fp);
                let recall = safe_div(tp, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                Some(ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1,
                    support,
                })
            })
            .collect();

        Self {
            accuracy,
            samples,
            per_class,
        }
    }
}

fn safe_div(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {:<10} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1", "support")?;
        for m in &self.per_class {
            writeln!(
                f,
                "  {:<10} {:>9.3} {:>9.3} {:>9.3} {:>9}",
                m.label.as_str(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        write!(f, "  accuracy: {:.3} (n={})", self.accuracy, self.samples)
    }
}
