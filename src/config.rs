use std::env;

use crate::feed::DEFAULT_FEED_URL;

pub struct Config {
    pub host: String,
    pub port: u16,
    /// CouponAPI.org API key. Required; the service refuses to start
    /// without it rather than failing on the first request.
    pub api_key: String,
    /// Provider feed endpoint, overridable for staging/testing.
    pub feed_url: String,
    /// Timeout for a single provider round trip.
    pub request_timeout_secs: u64,
    pub shutdown_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// `COUPON_API_KEY` is mandatory; everything else has a default:
    /// - `HOST` (0.0.0.0), `PORT` (8080)
    /// - `FEED_URL` (the CouponAPI.org incremental feed endpoint)
    /// - `REQUEST_TIMEOUT` (30s), `SHUTDOWN_TIMEOUT` (30s)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("COUPON_API_KEY")
            .map_err(|_| anyhow::anyhow!("COUPON_API_KEY environment variable is required"))?;
        if api_key.trim().is_empty() {
            anyhow::bail!("COUPON_API_KEY must not be empty");
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            api_key,
            feed_url: env::var("FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            shutdown_timeout_secs: env::var("SHUTDOWN_TIMEOUT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
        })
    }
}
