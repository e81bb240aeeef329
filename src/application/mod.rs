//! Application layer - state containers consumed by the client views.
//!
//! Each container coordinates domain aggregates with the ports they persist
//! or sync through. Containers are constructed from explicit dependencies
//! and shared behind `Arc`.

mod cart_store;
mod cart_summary;
mod marketplace_state;
mod query_cache;
mod review_feed;
mod wishlist_store;

pub use cart_store::{CartError, CartStore, DEFAULT_CART_KEY};
pub use cart_summary::{CartSummary, SellerGroup};
pub use marketplace_state::{MarketplaceDeps, MarketplaceState};
pub use query_cache::QueryCache;
pub use review_feed::{ProductReviews, ReviewFeed};
pub use wishlist_store::{WishlistError, WishlistStore};
