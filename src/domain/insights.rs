//! Human-readable pros and cons for a company.
//!
//! Two rule sets exist. Keyword classification sorts the free-text analysis
//! points shipped with each record; metric rules phrase the headline
//! ratios of the company section directly.

use crate::domain::company::CompanySection;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_PRO_KEYWORDS: &[&str] = &[
    "debt-free", "growth", "dividend", "healthy", "good", "roe", "profit",
];
pub const DEFAULT_CON_KEYWORDS: &[&str] = &["poor", "low", "not", "decline", "pressure"];
pub const DEFAULT_MAX_ITEMS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProsCons {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Which rule set produces the stored pros and cons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsightSource {
    #[default]
    Points,
    Metrics,
}

impl FromStr for InsightSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "points" => Ok(InsightSource::Points),
            "metrics" => Ok(InsightSource::Metrics),
            _ => anyhow::bail!("Invalid INSIGHT_SOURCE: {}. Must be 'points' or 'metrics'", s),
        }
    }
}

/// Keyword lists and cap for point classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPolicy {
    pub pro_keywords: Vec<String>,
    pub con_keywords: Vec<String>,
    pub max_items: usize,
}

impl Default for KeywordPolicy {
    fn default() -> Self {
        Self {
            pro_keywords: DEFAULT_PRO_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            con_keywords: DEFAULT_CON_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl KeywordPolicy {
    /// Sorts points into pros and cons.
    ///
    /// Matching is a case-insensitive substring test. Pro keywords are
    /// checked first, so a point matching both lists is a pro. Points
    /// matching neither are dropped. Both lists keep input order and are
    /// capped at `max_items`.
    pub fn derive_pros_cons<S: AsRef<str>>(&self, points: &[S]) -> ProsCons {
        let pro_keywords = lowercase_all(&self.pro_keywords);
        let con_keywords = lowercase_all(&self.con_keywords);
        let mut out = ProsCons::default();

        for point in points {
            let point = point.as_ref();
            let lowered = point.to_lowercase();
            if contains_any(&lowered, &pro_keywords) {
                if out.pros.len() < self.max_items {
                    out.pros.push(point.to_string());
                }
            } else if contains_any(&lowered, &con_keywords) && out.cons.len() < self.max_items {
                out.cons.push(point.to_string());
            }
        }
        out
    }
}

fn lowercase_all(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

/// Pros and cons phrased from ROE, ROCE and book value.
pub fn metric_insights(company: &CompanySection) -> ProsCons {
    let roe = company.roe_percentage.unwrap_or(0.0);
    let roce = company.roce_percentage.unwrap_or(0.0);
    let book_value = company.book_value.unwrap_or(0.0);

    let mut pros = Vec::new();
    let mut cons = Vec::new();

    if roe > 15.0 {
        pros.push(format!("Company has a strong Return on Equity (ROE) of {:?}%.", roe));
    }
    if roce > 15.0 {
        pros.push(format!(
            "Company shows excellent Return on Capital Employed (ROCE) of {:?}%.",
            roce
        ));
    }
    if book_value > 500.0 {
        pros.push(format!("Company has a high book value of {:?} INR.", book_value));
    }

    if roe < 10.0 {
        cons.push(format!("Company has a low Return on Equity (ROE) of only {:?}%.", roe));
    }
    if roce < 10.0 {
        cons.push(format!("Company has a weak ROCE of {:?}%.", roce));
    }
    if book_value < 100.0 {
        cons.push(format!("Company has a very low book value of {:?} INR.", book_value));
    }

    if pros.is_empty() {
        pros.push("No strong positive indicators found.".to_string());
    }
    if cons.is_empty() {
        cons.push("No major weaknesses detected.".to_string());
    }

    ProsCons { pros, cons }
}
