//! Client-side narrowing of a returned offer list.
//!
//! The provider applies its own server-side filters, but every operation in
//! this service runs the returned list through here as well, so all four
//! operations share one filtering semantics.

use crate::feed::types::Offer;

/// Optional predicates applied to a feed result. All comparisons are exact,
/// case-sensitive string equality; present predicates combine with AND.
#[derive(Debug, Default, Clone)]
pub struct FilterParams {
    pub store_id: Option<String>,
    pub store_name: Option<String>,
    pub category: Option<String>,
    /// Truncate the result to at most this many offers, keeping feed order.
    pub limit: Option<usize>,
}

/// Apply `params` to `offers`, preserving the upstream relative order.
/// The input is never mutated; with no predicates set the output is a
/// straight copy.
pub fn filter(offers: &[Offer], params: &FilterParams) -> Vec<Offer> {
    let mut result: Vec<Offer> = offers
        .iter()
        .filter(|offer| {
            params
                .store_id
                .as_deref()
                .map_or(true, |id| offer.store_id == id)
                && params
                    .store_name
                    .as_deref()
                    .map_or(true, |name| offer.store_name == name)
                && params
                    .category
                    .as_deref()
                    .map_or(true, |cat| offer.category == cat)
        })
        .cloned()
        .collect();

    if let Some(limit) = params.limit {
        result.truncate(limit);
    }
    result
}
