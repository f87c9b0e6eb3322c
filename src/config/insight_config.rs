//! Pros/cons generation settings.

use super::{lookup_string, parse_or};
use crate::domain::insights::{DEFAULT_MAX_ITEMS, InsightSource, KeywordPolicy};
use anyhow::Result;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct InsightEnvConfig {
    pub keywords: KeywordPolicy,
    pub source: InsightSource,
}

impl InsightEnvConfig {
    pub fn from_vars<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = KeywordPolicy::default();

        let source = match lookup_string(lookup, "INSIGHT_SOURCE") {
            Some(raw) => InsightSource::from_str(&raw)?,
            None => InsightSource::default(),
        };

        Ok(Self {
            keywords: KeywordPolicy {
                pro_keywords: keyword_list(lookup, "PRO_KEYWORDS")
                    .unwrap_or(defaults.pro_keywords),
                con_keywords: keyword_list(lookup, "CON_KEYWORDS")
                    .unwrap_or(defaults.con_keywords),
                max_items: parse_or(lookup, "MAX_INSIGHTS", DEFAULT_MAX_ITEMS),
            },
            source,
        })
    }
}

/// Comma separated keywords; `None` when unset or empty.
fn keyword_list<F>(lookup: &F, key: &str) -> Option<Vec<String>>
where
    F: Fn(&str) -> Option<String>,
{
    let keywords: Vec<String> = lookup_string(lookup, key)?
        .split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    (!keywords.is_empty()).then_some(keywords)
}
