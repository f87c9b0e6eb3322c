use crate::domain::insights::ProsCons;
use crate::domain::ml::labeling::StrengthLabel;
use serde::{Deserialize, Serialize};

/// Outcome of analysing one company. Exactly one per identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub identifier: String,
    pub label: StrengthLabel,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

impl AnalysisResult {
    pub fn new(identifier: impl Into<String>, label: StrengthLabel, insights: ProsCons) -> Self {
        Self {
            identifier: identifier.into(),
            label,
            pros: insights.pros,
            cons: insights.cons,
        }
    }

    /// Pros as stored: one per line.
    pub fn pros_text(&self) -> String {
        join_lines(&self.pros)
    }

    /// Cons as stored: one per line.
    pub fn cons_text(&self) -> String {
        join_lines(&self.cons)
    }
}

/// Joins items one per line. Line breaks inside an item become spaces so
/// [`split_lines`] gives back the same number of items.
fn join_lines(items: &[String]) -> String {
    items
        .iter()
        .map(|item| {
            item.split(['\r', '\n'])
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A persisted analysis row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub id: i64,
    pub company: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub strength: StrengthLabel,
}

/// Splits a stored newline-joined column back into items, dropping blanks.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
