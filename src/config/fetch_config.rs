//! Remote company API settings.

use super::{parse_or, string_or};
use std::path::PathBuf;

pub const DEFAULT_COMPANY_API_BASE_URL: &str = "https://bluemutualfund.in/server/api/company.php";

/// Remote fetch configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FetchEnvConfig {
    pub base_url: String,
    pub api_key: String,
    pub company_id_file: PathBuf,
    pub delay_ms: u64,
}

impl FetchEnvConfig {
    pub fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            base_url: string_or(lookup, "COMPANY_API_BASE_URL", DEFAULT_COMPANY_API_BASE_URL),
            api_key: string_or(lookup, "API_KEY", ""),
            company_id_file: string_or(lookup, "COMPANY_ID_FILE", "company_id.csv").into(),
            delay_ms: parse_or(lookup, "FETCH_DELAY_MS", 1000),
        }
    }
}
