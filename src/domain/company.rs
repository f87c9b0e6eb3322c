//! Company record model.
//!
//! Raw payloads from the company API are loosely typed: numbers arrive as
//! JSON numbers, numeric strings, empty strings or `null`, and whole sections
//! may be missing. All of that is normalised here, in one decoding step, so
//! the rest of the crate works with plain `Option<f64>` and typed sections.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// One company as returned by the remote API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyRecord {
    #[serde(default, deserialize_with = "lenient::optional_section")]
    pub company: Option<CompanySection>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub analysis: AnalysisSection,
    #[serde(default, deserialize_with = "lenient::section")]
    pub data: FinancialData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanySection {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub roe_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub roce_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub book_value: Option<f64>,
    /// Remaining fields (logo, website, face value, ...) passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisSection {
    #[serde(default, deserialize_with = "lenient::number")]
    pub sales_growth: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub dividend_payout: Option<f64>,
    /// Free-text observations, in the order the API lists them.
    #[serde(default, deserialize_with = "lenient::strings")]
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialData {
    #[serde(default, deserialize_with = "lenient::statements")]
    pub profitandloss: Vec<ProfitAndLoss>,
    #[serde(default, deserialize_with = "lenient::statements")]
    pub balancesheet: Vec<BalanceSheet>,
}

/// Yearly profit and loss statement. Oldest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfitAndLoss {
    #[serde(default, deserialize_with = "lenient::number")]
    pub net_profit: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub sales: Option<f64>,
}

/// Yearly balance sheet. Oldest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BalanceSheet {
    #[serde(default, deserialize_with = "lenient::number")]
    pub borrowings: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub reserves: Option<f64>,
}

impl CompanyRecord {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Latest yearly profit and loss statement, if any.
    pub fn latest_profit_and_loss(&self) -> Option<&ProfitAndLoss> {
        self.data.profitandloss.last()
    }

    /// Latest yearly balance sheet, if any.
    pub fn latest_balance_sheet(&self) -> Option<&BalanceSheet> {
        self.data.balancesheet.last()
    }

    /// Resolves the identifier for this record.
    ///
    /// A non-empty `company.id` in the payload wins; otherwise the file stem
    /// (`TCS.json` -> `TCS`) is used.
    pub fn identifier(&self, path: &Path) -> Option<String> {
        self.company
            .as_ref()
            .and_then(|c| c.id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| identifier_from_path(path))
    }
}

/// File stem of a record path, used as the company identifier.
pub fn identifier_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Field decoders that never reject a payload.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Safe float cast: JSON numbers and numeric strings only, finite values only.
    pub fn to_f64(value: &Value) -> Option<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(to_f64(&value))
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    /// Non-object elements become an all-absent statement so that the
    /// position of the latest year is preserved.
    pub fn statements<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(items) => items.into_iter().map(decode_or_default).collect(),
            _ => Vec::new(),
        })
    }

    pub fn section<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(decode_or_default(value))
    }

    pub fn optional_section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Object(_) => T::deserialize(value).ok(),
            _ => None,
        })
    }

    fn decode_or_default<T: DeserializeOwned + Default>(value: Value) -> T {
        match value {
            Value::Object(_) => T::deserialize(value).unwrap_or_default(),
            _ => T::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_accept_strings_and_reject_garbage() {
        let record: CompanyRecord = serde_json::from_value(json!({
            "company": {
                "id": "TCS",
                "roe_percentage": "45.2",
                "roce_percentage": "",
                "book_value": null
            },
            "analysis": { "sales_growth": 12, "dividend_payout": "n/a" }
        }))
        .unwrap();

        let company = record.company.unwrap();
        assert_eq!(company.roe_percentage, Some(45.2));
        assert_eq!(company.roce_percentage, None);
        assert_eq!(company.book_value, None);
        assert_eq!(record.analysis.sales_growth, Some(12.0));
        assert_eq!(record.analysis.dividend_payout, None);
    }

    #[test]
    fn test_non_finite_strings_are_absent() {
        let record: CompanyRecord = serde_json::from_value(json!({
            "analysis": { "sales_growth": "inf", "dividend_payout": "NaN" }
        }))
        .unwrap();
        assert_eq!(record.analysis.sales_growth, None);
        assert_eq!(record.analysis.dividend_payout, None);
    }

    #[test]
    fn test_wrong_section_shapes_fall_back_to_defaults() {
        let record: CompanyRecord = serde_json::from_value(json!({
            "company": "not an object",
            "analysis": [1, 2, 3],
            "data": { "profitandloss": "oops", "balancesheet": [null, {"reserves": 10}] }
        }))
        .unwrap();

        assert!(record.company.is_none());
        assert!(record.analysis.points.is_empty());
        assert!(record.data.profitandloss.is_empty());
        assert_eq!(record.data.balancesheet.len(), 2);
        assert_eq!(record.latest_balance_sheet().unwrap().reserves, Some(10.0));
    }

    #[test]
    fn test_points_keep_strings_only() {
        let record: CompanyRecord = serde_json::from_value(json!({
            "analysis": { "points": ["Debt free", 42, null, "Low margin"] }
        }))
        .unwrap();
        assert_eq!(record.analysis.points, vec!["Debt free", "Low margin"]);
    }

    #[test]
    fn test_identifier_prefers_payload_id() {
        let path = Path::new("data/tcs_file.json");

        let with_id: CompanyRecord =
            serde_json::from_value(json!({ "company": { "id": " TCS " } })).unwrap();
        assert_eq!(with_id.identifier(path).as_deref(), Some("TCS"));

        let blank_id: CompanyRecord =
            serde_json::from_value(json!({ "company": { "id": "  " } })).unwrap();
        assert_eq!(blank_id.identifier(path).as_deref(), Some("tcs_file"));

        let no_company = CompanyRecord::default();
        assert_eq!(no_company.identifier(path).as_deref(), Some("tcs_file"));
    }

    #[test]
    fn test_extra_company_fields_are_kept() {
        let record: CompanyRecord = serde_json::from_value(json!({
            "company": { "id": "INFY", "website": "https://infosys.com", "face_value": 5 }
        }))
        .unwrap();
        let company = record.company.unwrap();
        assert_eq!(company.extra["website"], json!("https://infosys.com"));
        assert_eq!(company.extra["face_value"], json!(5));
    }
}
