//! Client-wide state shared by every view of the marketplace.

use std::sync::Arc;
use std::time::Duration;

use crate::ports::{
    IdentityProvider, KeyValueStore, Notifier, ProductReviewReader, WishlistRepository,
};

use super::{CartStore, ReviewFeed, WishlistStore};

/// Dependencies needed to assemble [`MarketplaceState`].
pub struct MarketplaceDeps {
    pub cart_storage: Arc<dyn KeyValueStore>,
    pub cart_key: String,
    pub wishlist_repository: Arc<dyn WishlistRepository>,
    pub review_reader: Arc<dyn ProductReviewReader>,
    pub identity: Arc<dyn IdentityProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub wishlist_stale_after: Option<Duration>,
}

/// One cart, one wishlist and the review feed, cheap to clone into consumers.
#[derive(Clone)]
pub struct MarketplaceState {
    pub cart: Arc<CartStore>,
    pub wishlist: Arc<WishlistStore>,
    pub reviews: Arc<ReviewFeed>,
}

impl MarketplaceState {
    pub fn new(deps: MarketplaceDeps) -> Self {
        let cart = CartStore::hydrate(deps.cart_storage, deps.cart_key);
        let wishlist = WishlistStore::new(
            deps.wishlist_repository,
            deps.identity,
            deps.notifier,
            deps.wishlist_stale_after,
        );

        tracing::info!(
            item_count = cart.item_count(),
            "Marketplace state initialized"
        );

        Self {
            cart: Arc::new(cart),
            wishlist: Arc::new(wishlist),
            reviews: Arc::new(ReviewFeed::new(deps.review_reader)),
        }
    }
}
