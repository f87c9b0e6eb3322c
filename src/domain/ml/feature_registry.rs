use crate::domain::company::CompanyRecord;
use serde::{Deserialize, Serialize};

/// Ordered list of feature names.
/// This order MUST match between training and inference.
/// Any change here is a breaking change for persisted models.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "roe",
    "sales_growth",
    "dividend_payout",
    "profit_margin",
    "debt_to_equity",
];

pub const FEATURE_COUNT: usize = 5;

/// Numeric profile of one company.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Return on equity, percent.
    pub roe: f64,
    /// Sales growth, percent.
    pub sales_growth: f64,
    /// Dividend payout, percent.
    pub dividend_payout: f64,
    /// Latest year's net profit over sales, percent.
    pub profit_margin: f64,
    /// Latest year's borrowings over reserves.
    pub debt_to_equity: f64,
}

impl FeatureVector {
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.roe,
            self.sales_growth,
            self.dividend_payout,
            self.profit_margin,
            self.debt_to_equity,
        ]
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.to_array().to_vec()
    }
}

/// Converts a company record into its feature vector.
///
/// Total: missing or malformed fields read as 0.0 and both ratios are 0.0
/// when their divisor is not positive or there is no yearly data.
pub fn extract_features(record: &CompanyRecord) -> FeatureVector {
    let company = record.company.as_ref();

    let profit_margin = record
        .latest_profit_and_loss()
        .map(|pl| ratio(pl.net_profit.unwrap_or(0.0), pl.sales.unwrap_or(0.0)) * 100.0)
        .unwrap_or(0.0);

    let debt_to_equity = record
        .latest_balance_sheet()
        .map(|bs| ratio(bs.borrowings.unwrap_or(0.0), bs.reserves.unwrap_or(0.0)))
        .unwrap_or(0.0);

    FeatureVector {
        roe: company.and_then(|c| c.roe_percentage).unwrap_or(0.0),
        sales_growth: record.analysis.sales_growth.unwrap_or(0.0),
        dividend_payout: record.analysis.dividend_payout.unwrap_or(0.0),
        profit_margin: finite_or_zero(profit_margin),
        debt_to_equity,
    }
}

/// Guarded division: non-positive divisors and overflow yield 0.0.
fn ratio(numerator: f64, divisor: f64) -> f64 {
    if divisor <= 0.0 {
        return 0.0;
    }
    finite_or_zero(numerator / divisor)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
