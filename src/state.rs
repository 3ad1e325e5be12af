use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::feed::{CouponApiClient, ExtractionCursor, FeedClient};

/// Application state shared across all request handlers.
///
/// The feed client is held as a trait object so tests can inject a stub
/// in place of the real network client. The extraction cursor is the only
/// mutable piece; it is atomic internally, so the state needs no locking.
pub struct AppState {
    pub client: Arc<dyn FeedClient>,
    pub cursor: ExtractionCursor,
    pub config: Arc<Config>,
}

impl AppState {
    /// Initialize state with the real CouponAPI.org client.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = CouponApiClient::new(
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?
        .with_base_url(config.feed_url.clone());

        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Build state around an arbitrary feed client. Used by tests to run
    /// the full handler stack against canned offers.
    pub fn with_client(config: Config, client: Arc<dyn FeedClient>) -> Self {
        Self {
            client,
            cursor: ExtractionCursor::new(),
            config: Arc::new(config),
        }
    }
}
