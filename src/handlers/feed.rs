use crate::error::{AppError, Result};
use crate::feed::{filter, FeedQuery, FilterParams};
use crate::render::{to_csv, ResponseFormat};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    /// Explicit "since" timestamp (epoch seconds). Overrides the stored
    /// extraction cursor without modifying it.
    pub last_extract: Option<i64>,
    pub response_format: Option<String>,
    pub limit: Option<usize>,
    pub store_id: Option<String>,
    pub category: Option<String>,
    /// When set, the fetch does not advance the extraction cursor, so the
    /// same incremental window can be re-polled.
    #[serde(default)]
    pub off_record: bool,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub offer_count: usize,
    /// The effective "since" timestamp this fetch used, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_extract: Option<i64>,
    pub offers: Vec<crate::feed::Offer>,
}

/// GET /feed - Incremental feed of coupon offers.
///
/// # Flow
/// 1. Validate parameters (format and limit checked before any remote call)
/// 2. Resolve the effective "since" timestamp via the extraction cursor
/// 3. Fetch from the provider, capturing the fetch start time first
/// 4. Apply client-side filters (store_id, category, limit)
/// 5. Render as JSON or CSV
/// 6. Advance the cursor to the fetch start time, unless off_record
pub async fn feed_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedParams>,
) -> Result<Response> {
    let format = ResponseFormat::parse(params.response_format.as_deref())?;

    if let Some(last_extract) = params.last_extract {
        if last_extract < 0 {
            return Err(AppError::Validation(
                "last_extract must be a non-negative UNIX timestamp".to_string(),
            ));
        }
    }
    if params.limit == Some(0) {
        return Err(AppError::Validation("limit must be at least 1".to_string()));
    }

    let since = state.cursor.resolve(params.last_extract);
    let fetch_started_at = unix_now();

    let offers = state
        .client
        .fetch(FeedQuery {
            last_extract: since,
            limit: params.limit,
            store_id: params.store_id.clone(),
            category: params.category.clone(),
            off_record: params.off_record,
        })
        .await?;

    // Provider-side filtering is not trusted; the same predicates run here
    // so all operations share one filtering semantics.
    let filtered = filter(
        &offers,
        &FilterParams {
            store_id: params.store_id,
            category: params.category,
            limit: params.limit,
            ..Default::default()
        },
    );

    tracing::debug!(
        fetched = offers.len(),
        returned = filtered.len(),
        since = ?since,
        off_record = params.off_record,
        "Incremental feed served"
    );
    metrics::counter!("feed_requests_total").increment(1);
    metrics::histogram!("feed_offers_returned").record(filtered.len() as f64);

    let response = match format {
        ResponseFormat::Json => Json(FeedResponse {
            offer_count: filtered.len(),
            last_extract: since,
            offers: filtered,
        })
        .into_response(),
        ResponseFormat::Csv => {
            let body = to_csv(&filtered)?;
            ([(header::CONTENT_TYPE, format.content_type())], body).into_response()
        }
    };

    // Only reached on success; failures above leave the cursor untouched.
    state.cursor.advance(fetch_started_at, params.off_record);

    Ok(response)
}

/// Current time as UNIX epoch seconds.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
