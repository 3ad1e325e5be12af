//! Remote feed client for the coupon provider.
//!
//! `FeedClient` is the seam between the service and the network: handlers
//! only see the trait, so tests can substitute a stub that returns canned
//! offers. `CouponApiClient` is the real implementation over reqwest.

use async_trait::async_trait;
use thiserror::Error;

use crate::feed::types::{FeedEnvelope, Offer};

pub const DEFAULT_FEED_URL: &str = "https://couponapi.org/api/getIncrementalFeed/";

/// Parameters forwarded to the provider for one fetch. All fields optional;
/// an empty query means "all currently active offers".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    /// Effective "since" timestamp (epoch seconds), already resolved
    /// against the extraction cursor by the caller.
    pub last_extract: Option<i64>,
    pub limit: Option<usize>,
    pub store_id: Option<String>,
    pub category: Option<String>,
    /// Ask the provider not to record this extraction on its side either.
    pub off_record: bool,
}

/// Errors from the remote feed collaborator.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Provider answered with an in-band error body (`error != 0`).
    #[error("provider rejected request: {0}")]
    Provider(String),

    /// Non-success HTTP status from the provider.
    #[error("provider returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FeedError {
    /// Whether retrying the same request later could plausibly succeed.
    /// Connect failures and timeouts are transient; everything the provider
    /// actively rejected is not.
    pub fn is_transient(&self) -> bool {
        match self {
            FeedError::Http(e) => e.is_timeout() || e.is_connect(),
            FeedError::Status { status, .. } => status.is_server_error(),
            FeedError::Provider(_) | FeedError::Decode(_) => false,
        }
    }
}

/// The remote feed collaborator: fetch offers matching a query.
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn fetch(&self, query: FeedQuery) -> Result<Vec<Offer>, FeedError>;
}

/// Real CouponAPI.org client.
///
/// Always requests JSON from the provider; CSV output is rendered locally
/// (see `render`) so client-side filtering behaves identically in both
/// formats.
pub struct CouponApiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl CouponApiClient {
    pub fn new(api_key: String, timeout: std::time::Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key,
            base_url: DEFAULT_FEED_URL.to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl FeedClient for CouponApiClient {
    async fn fetch(&self, query: FeedQuery) -> Result<Vec<Offer>, FeedError> {
        let mut params: Vec<(&str, String)> = vec![
            ("API_KEY", self.api_key.clone()),
            ("format", "json".to_string()),
        ];
        if let Some(last_extract) = query.last_extract {
            params.push(("last_extract", last_extract.to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(store_id) = &query.store_id {
            params.push(("store_id", store_id.clone()));
        }
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }
        if query.off_record {
            params.push(("off_record", "1".to_string()));
        }

        let response = self.client.get(&self.base_url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status { status, body });
        }

        let body = response.text().await?;
        let envelope: FeedEnvelope = serde_json::from_str(&body)?;

        if envelope.error != 0 {
            return Err(FeedError::Provider(
                envelope
                    .message
                    .unwrap_or_else(|| format!("error code {}", envelope.error)),
            ));
        }

        tracing::debug!(
            offer_count = envelope.offers.len(),
            last_extract = ?query.last_extract,
            provider_extract_ts = ?envelope.incremental_update_timestamp,
            "Feed fetch completed"
        );

        Ok(envelope.offers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(server: &mockito::ServerGuard) -> CouponApiClient {
        CouponApiClient::new("test-key".to_string(), std::time::Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.url())
    }

    #[tokio::test]
    async fn fetch_parses_offers_and_sends_query_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("API_KEY".into(), "test-key".into()),
                mockito::Matcher::UrlEncoded("format".into(), "json".into()),
                mockito::Matcher::UrlEncoded("last_extract".into(), "1700000000".into()),
                mockito::Matcher::UrlEncoded("off_record".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"error":0,"offers":[
                    {"offer_id":"1","store_id":"A","store_name":"Acme","category":"electronics"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = test_client(&server);
        let offers = client
            .fetch(FeedQuery {
                last_extract: Some(1_700_000_000),
                off_record: true,
                ..Default::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].offer_id, "1");
        assert_eq!(offers[0].store_name, "Acme");
    }

    #[tokio::test]
    async fn provider_error_body_is_a_permanent_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"error":1,"message":"Invalid API key"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.fetch(FeedQuery::default()).await.unwrap_err();

        assert!(matches!(&err, FeedError::Provider(msg) if msg == "Invalid API key"));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn server_error_status_is_transient() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .with_body("upstream overloaded")
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.fetch(FeedQuery::default()).await.unwrap_err();

        assert!(matches!(err, FeedError::Status { .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.fetch(FeedQuery::default()).await.unwrap_err();

        assert!(matches!(err, FeedError::Decode(_)));
    }
}
