use crate::infrastructure::core::HttpClientFactory;
use anyhow::{Context, Result};
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Client for the per-company financials endpoint.
///
/// One `GET {base_url}?id={id}&api_key={key}` per company; the body is the
/// raw record JSON.
pub struct CompanyApiClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
}

impl CompanyApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(HttpClientFactory::create_client(), base_url, api_key)
    }

    pub fn with_client(
        client: ClientWithMiddleware,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn request_url(&self, company_id: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.base_url,
            &[("id", company_id), ("api_key", self.api_key.as_str())],
        )
        .with_context(|| format!("Invalid company API base URL: {}", self.base_url))
    }

    /// Fetches one record.
    ///
    /// `Ok(None)` when the server answers with a non-success status or an
    /// empty payload. Transport and decoding failures are errors.
    pub async fn fetch(&self, company_id: &str) -> Result<Option<Value>> {
        let url = self.request_url(company_id)?;
        debug!("Requesting company data for {}", company_id);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request for {} failed", company_id))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "Failed to fetch data for {}. Status code: {}",
                company_id,
                status.as_u16()
            );
            return Ok(None);
        }

        let payload: Value = response
            .json()
            .await
            .with_context(|| format!("Response for {} is not valid JSON", company_id))?;

        if is_empty_payload(&payload) {
            warn!("Empty payload returned for {}", company_id);
            return Ok(None);
        }
        Ok(Some(payload))
    }
}

fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_url_encodes_parameters() {
        let client = CompanyApiClient::new("https://example.com/api/company.php", "k&y");
        let url = client.request_url("M&M").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/company.php?id=M%26M&api_key=k%26y"
        );
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        let client = CompanyApiClient::new("not a url", "key");
        assert!(client.request_url("TCS").is_err());
    }

    #[test]
    fn test_empty_payloads() {
        assert!(is_empty_payload(&Value::Null));
        assert!(is_empty_payload(&json!({})));
        assert!(is_empty_payload(&json!([])));
        assert!(!is_empty_payload(&json!({"company": {"id": "TCS"}})));
        assert!(!is_empty_payload(&json!(0)));
    }
}
