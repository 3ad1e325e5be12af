pub mod feed;
pub mod health;
pub mod offers;

pub use feed::feed_handler;
pub use health::{health_handler, ready_handler};
pub use offers::{offer_details_handler, offers_by_category_handler, offers_by_store_handler};
