//! Couponrelay - thin HTTP relay over the CouponAPI.org incremental feed
//!
//! This library exposes the core components of the relay, enabling
//! integration tests and potential embedding in other applications.

pub mod config;
pub mod error;
pub mod feed;
pub mod handlers;
pub mod render;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::{AppError, Result};
pub use feed::{ExtractionCursor, FeedClient, FeedError, FeedQuery, Offer};
pub use handlers::{
    feed_handler, health_handler, offer_details_handler, offers_by_category_handler,
    offers_by_store_handler, ready_handler,
};
pub use state::AppState;
