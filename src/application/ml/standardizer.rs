use crate::domain::ml::FEATURE_COUNT;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Per-feature z-score scaling, fitted on the training partition only.
///
/// Columns with zero variance keep a scale of 1.0 so they pass through
/// centred instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub means: [f64; FEATURE_COUNT],
    pub scales: [f64; FEATURE_COUNT],
}

impl Standardizer {
    /// Fits column means and population standard deviations.
    /// An empty input yields the identity transform.
    pub fn fit(rows: &[[f64; FEATURE_COUNT]]) -> Self {
        let mut means = [0.0; FEATURE_COUNT];
        let mut scales = [1.0; FEATURE_COUNT];
        if rows.is_empty() {
            return Self { means, scales };
        }

        for col in 0..FEATURE_COUNT {
            let column: Vec<f64> = rows.iter().map(|row| row[col]).collect();
            means[col] = column.iter().mean();
            let std_dev = column.iter().population_std_dev();
            if std_dev.is_finite() && std_dev > f64::EPSILON {
                scales[col] = std_dev;
            }
        }

        Self { means, scales }
    }

    pub fn transform_row(&self, row: &[f64; FEATURE_COUNT]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(self.scales.iter()))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect()
    }

    pub fn transform(&self, rows: &[[f64; FEATURE_COUNT]]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }
}
