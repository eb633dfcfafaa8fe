//! HTTP client for an Etherscan-style account-history API.

use crate::error::ExplorerError;
use crate::records::FeedBatch;
use crate::request::FeedRequest;
use crate::source::FeedSource;

use async_trait::async_trait;
use fundflow_types::Category;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default timeout for a single feed request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the provider's `module=account` endpoints.
///
/// Sends `GET {base_url}?chainid=..&module=account&action=..` and decodes the
/// `{status, message, result}` envelope. The underlying connection pool is
/// shared by every request made through one client.
#[derive(Clone)]
pub struct ExplorerClient {
    http_client: reqwest::Client,
    base_url: String,
    /// Process-wide credential, used unless a request carries its own.
    api_key: String,
}

/// Provider reply envelope. `result` is an array of records on success and a
/// human-readable string on most errors.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: serde_json::Value,
}

impl ExplorerClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one category feed for `request`.
    pub async fn fetch_feed(&self, category: Category, request: &FeedRequest) -> Result<FeedBatch, ExplorerError> {
        let pairs = request.query_pairs(category, &self.api_key);

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&pairs)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExplorerError::Unavailable(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    ExplorerError::Unavailable(format!("connection failed: {e}"))
                } else {
                    ExplorerError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::Rejected(format!("HTTP status {status}")));
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| ExplorerError::Malformed(format!("failed to parse {} response: {e}", category.action())))?;

        decode_envelope(category, envelope)
    }
}

/// Map a decoded envelope onto a batch or a provider-side rejection.
///
/// `status:"0"` with an empty array ("No transactions found") is an empty
/// feed, not an error.
fn decode_envelope(category: Category, envelope: Envelope) -> Result<FeedBatch, ExplorerError> {
    if !envelope.result.is_array() {
        let detail = match envelope.result.as_str() {
            Some(text) if !text.is_empty() => format!("{}: {text}", envelope.message),
            _ => envelope.message,
        };
        return Err(ExplorerError::Rejected(detail));
    }

    let batch = FeedBatch::decode(category, envelope.result)
        .map_err(|e| ExplorerError::Malformed(format!("failed to decode {} records: {e}", category.action())))?;

    debug!(
        category = %category,
        status = %envelope.status,
        records = batch.len(),
        "feed decoded"
    );
    Ok(batch)
}

#[async_trait]
impl FeedSource for ExplorerClient {
    async fn fetch(&self, category: Category, request: &FeedRequest) -> Result<FeedBatch, ExplorerError> {
        self.fetch_feed(category, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn client_creation() {
        let client = ExplorerClient::new("https://api.etherscan.io/v2/api", "KEY");
        assert_eq!(client.base_url(), "https://api.etherscan.io/v2/api");
        let _ = ExplorerClient::with_timeout("http://localhost", "", Duration::from_secs(1));
    }

    #[test]
    fn empty_result_with_status_zero_is_empty_feed() {
        let env = envelope(json!({"status": "0", "message": "No transactions found", "result": []}));
        let batch = decode_envelope(Category::Internal, env).unwrap();
        assert_eq!(batch.category(), Category::Internal);
        assert!(batch.is_empty());
    }

    #[test]
    fn string_result_is_rejected_with_detail() {
        let env = envelope(json!({"status": "0", "message": "NOTOK", "result": "Invalid API Key"}));
        assert_eq!(
            decode_envelope(Category::Native, env),
            Err(ExplorerError::Rejected("NOTOK: Invalid API Key".into()))
        );
    }

    #[test]
    fn missing_result_is_rejected() {
        let env = envelope(json!({"status": "0", "message": "NOTOK"}));
        assert_eq!(
            decode_envelope(Category::Native, env),
            Err(ExplorerError::Rejected("NOTOK".into()))
        );
    }

    #[test]
    fn wrong_record_shape_is_malformed() {
        let env = envelope(json!({"status": "1", "message": "OK", "result": [42]}));
        assert!(matches!(
            decode_envelope(Category::FungibleToken, env),
            Err(ExplorerError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        let client = ExplorerClient::with_timeout("http://127.0.0.1:1", "KEY", Duration::from_secs(2));
        let request = FeedRequest::new(
            fundflow_types::Address::parse("0x00000000219ab540356cbb839cbe05303d7705fa").unwrap(),
            fundflow_types::ChainId::MAINNET,
        );
        let result = client.fetch(Category::Native, &request).await;
        assert!(matches!(result, Err(ExplorerError::Unavailable(_))));
    }
}
