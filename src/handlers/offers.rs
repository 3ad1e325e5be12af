//! Derived lookups over the active offer feed.
//!
//! All three operations are thin parameterizations of the same primitive:
//! fetch the full active snapshot (no cursor involvement), then filter.
//! Keeping them on one code path guarantees the filtering semantics stay
//! consistent with the incremental feed.

use crate::error::{AppError, Result};
use crate::feed::{filter, FeedQuery, FilterParams, Offer};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct StoreOffersResponse {
    pub store_name: String,
    pub offer_count: usize,
    pub offers: Vec<Offer>,
}

#[derive(Debug, Serialize)]
pub struct CategoryOffersResponse {
    pub category: String,
    pub offer_count: usize,
    pub offers: Vec<Offer>,
}

/// Full active snapshot from the provider. Never consults or advances the
/// extraction cursor: these lookups are always fresh, full reads.
async fn fetch_active_offers(state: &AppState) -> Result<Vec<Offer>> {
    let offers = state.client.fetch(FeedQuery::default()).await?;
    Ok(offers)
}

fn require_nonempty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", name)));
    }
    Ok(())
}

/// GET /offers/:offer_id - Details for a single offer.
///
/// Scans the active feed for the requested id. No match is a not-found
/// error, never an empty success. Duplicate ids should not happen; if the
/// provider sends them anyway, the first in feed order wins and the
/// duplication is logged as a data-quality signal.
pub async fn offer_details_handler(
    State(state): State<Arc<AppState>>,
    Path(offer_id): Path<String>,
) -> Result<Json<Offer>> {
    require_nonempty(&offer_id, "offer_id")?;

    let offers = fetch_active_offers(&state).await?;
    let matches: Vec<&Offer> = offers.iter().filter(|o| o.offer_id == offer_id).collect();

    if matches.len() > 1 {
        tracing::warn!(
            offer_id = %offer_id,
            count = matches.len(),
            "Duplicate offer_id in provider feed"
        );
    }

    metrics::counter!("offer_detail_requests_total").increment(1);

    match matches.first() {
        Some(offer) => Ok(Json((*offer).clone())),
        None => Err(AppError::NotFound(format!(
            "offer with ID {} not found",
            offer_id
        ))),
    }
}

/// GET /stores/:store_name/offers - All active offers for one store.
pub async fn offers_by_store_handler(
    State(state): State<Arc<AppState>>,
    Path(store_name): Path<String>,
) -> Result<Json<StoreOffersResponse>> {
    require_nonempty(&store_name, "store_name")?;

    let offers = fetch_active_offers(&state).await?;
    let offers = filter(
        &offers,
        &FilterParams {
            store_name: Some(store_name.clone()),
            ..Default::default()
        },
    );

    metrics::counter!("store_offer_requests_total").increment(1);

    Ok(Json(StoreOffersResponse {
        store_name,
        offer_count: offers.len(),
        offers,
    }))
}

/// GET /categories/:category/offers - All active offers in one category.
pub async fn offers_by_category_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<CategoryOffersResponse>> {
    require_nonempty(&category, "category")?;

    let offers = fetch_active_offers(&state).await?;
    let offers = filter(
        &offers,
        &FilterParams {
            category: Some(category.clone()),
            ..Default::default()
        },
    );

    metrics::counter!("category_offer_requests_total").increment(1);

    Ok(Json(CategoryOffersResponse {
        category,
        offer_count: offers.len(),
        offers,
    }))
}
