//! Type definitions for the coupon feed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single coupon offer as received from the provider.
///
/// Offers are immutable snapshots: this service only filters and forwards
/// them, never edits them. Fields beyond the known set are preserved in
/// `extra` so provider additions survive the round trip (JSON output only;
/// CSV uses the fixed column set).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    /// Unique offer identifier
    pub offer_id: String,

    /// Store identifier (used by the `store_id` feed filter)
    #[serde(default)]
    pub store_id: String,

    /// Human-readable store name (used by the by-store lookup)
    #[serde(default)]
    pub store_name: String,

    /// Offer category
    #[serde(default)]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Coupon code, absent for deal-type offers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Provider status: "new", "updated", or "suspended"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Any provider fields not modeled above. Flattening an empty map
    /// contributes nothing, so typical offers serialize unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw response body from the provider's getIncrementalFeed endpoint.
///
/// The provider signals failures in-band: `error` is non-zero and `message`
/// carries the reason, with `offers` absent.
#[derive(Debug, Deserialize)]
pub struct FeedEnvelope {
    #[serde(default)]
    pub error: i64,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub offers: Vec<Offer>,

    /// Timestamp the provider recorded for this extraction, when present
    #[serde(default)]
    pub incremental_update_timestamp: Option<i64>,
}

#[cfg(test)]
impl Offer {
    /// Minimal offer for tests.
    pub fn test(offer_id: &str, store_id: &str, store_name: &str, category: &str) -> Self {
        Self {
            offer_id: offer_id.to_string(),
            store_id: store_id.to_string(),
            store_name: store_name.to_string(),
            category: category.to_string(),
            title: None,
            description: None,
            code: None,
            url: None,
            start_date: None,
            end_date: None,
            status: None,
            extra: Map::new(),
        }
    }
}
