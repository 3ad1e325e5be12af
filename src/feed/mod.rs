pub mod client;
pub mod cursor;
pub mod filter;
pub mod types;

pub use client::{CouponApiClient, FeedClient, FeedError, FeedQuery, DEFAULT_FEED_URL};
pub use cursor::ExtractionCursor;
pub use filter::{filter, FilterParams};
pub use types::{FeedEnvelope, Offer};
