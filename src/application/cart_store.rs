//! CartStore - the shared, persisted cart container.
//!
//! Wraps the [`Cart`] aggregate with a storage slot. The line list is
//! hydrated from the slot once at construction and written back in full after
//! every mutating call. Operations are synchronous and apply in call order.
//!
//! Subscribers receive a fresh [`CartSummary`] after each mutation through a
//! `tokio::sync::watch` channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::watch;

use crate::domain::cart::{Cart, CartLineItem, NewLineItem};
use crate::domain::foundation::{LineItemId, SellerId, ValidationError};
use crate::ports::KeyValueStore;

use super::CartSummary;

/// Default storage key for the persisted cart.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Errors returned by cart operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CartError {
    #[error("Invalid cart item: {0}")]
    Validation(#[from] ValidationError),
}

/// Cart container shared by every consumer that reads or edits the cart.
pub struct CartStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    cart: RwLock<Cart>,
    open: AtomicBool,
    changes: watch::Sender<CartSummary>,
}

impl CartStore {
    /// Builds the container and hydrates it from `key`.
    ///
    /// A missing, unreadable or malformed value yields an empty cart; the
    /// failure is logged and never surfaced.
    pub fn hydrate(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = load_cart(store.as_ref(), &key);
        let (changes, _) = watch::channel(CartSummary::from_cart(&cart));

        Self {
            store,
            key,
            cart: RwLock::new(cart),
            open: AtomicBool::new(false),
            changes,
        }
    }

    /// Adds a product, merging with an existing line for the same product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Validation` for a zero quantity, zero stock or an
    /// invalid price. The cart is not changed and nothing is written.
    pub fn add_item(&self, item: NewLineItem) -> Result<LineItemId, CartError> {
        let mut cart = self.write_cart();
        let product_id = item.product_id.clone();
        let id = cart.add_item(item)?;
        tracing::debug!(line_id = %id, product_id = %product_id, "Added item to cart");
        self.commit(&cart);
        Ok(id)
    }

    pub fn remove_item(&self, id: &LineItemId) {
        let mut cart = self.write_cart();
        if cart.remove_item(id) {
            tracing::debug!(line_id = %id, "Removed cart line");
        }
        self.commit(&cart);
    }

    /// Sets a line's quantity; zero or below removes it, above stock clamps.
    pub fn update_quantity(&self, id: &LineItemId, quantity: i64) {
        let mut cart = self.write_cart();
        cart.update_quantity(id, quantity);
        self.commit(&cart);
    }

    pub fn clear_cart(&self) {
        let mut cart = self.write_cart();
        cart.clear();
        tracing::debug!("Cleared cart");
        self.commit(&cart);
    }

    /// Removes every line of one seller, e.g. after that seller's checkout.
    pub fn clear_seller_items(&self, seller_id: &SellerId) {
        let mut cart = self.write_cart();
        let removed = cart.clear_seller_items(seller_id);
        tracing::debug!(seller_id = %seller_id, removed, "Cleared seller items");
        self.commit(&cart);
    }

    pub fn items(&self) -> Vec<CartLineItem> {
        self.read_cart().items().to_vec()
    }

    pub fn item_count(&self) -> u64 {
        self.read_cart().item_count()
    }

    pub fn subtotal(&self) -> f64 {
        self.read_cart().subtotal()
    }

    pub fn seller_items(&self, seller_id: &SellerId) -> Vec<CartLineItem> {
        self.read_cart().seller_items(seller_id)
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::from_cart(&self.read_cart())
    }

    /// Receives a new summary after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<CartSummary> {
        self.changes.subscribe()
    }

    /// Whether the cart panel is shown. Presentation state only; not persisted.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn set_open(&self, open: bool) {
        self.open.store(open, Ordering::SeqCst);
    }

    fn read_cart(&self) -> std::sync::RwLockReadGuard<'_, Cart> {
        self.cart.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cart(&self) -> std::sync::RwLockWriteGuard<'_, Cart> {
        self.cart.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persists the full line list and notifies subscribers.
    ///
    /// Called with the write lock held so stored order matches call order.
    fn commit(&self, cart: &Cart) {
        match serde_json::to_string(cart.items()) {
            Ok(json) => {
                if let Err(e) = self.store.set(&self.key, &json) {
                    tracing::warn!(key = %self.key, error = %e, "Failed to persist cart");
                }
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to serialize cart");
            }
        }
        self.changes.send_replace(CartSummary::from_cart(cart));
    }
}

fn load_cart(store: &dyn KeyValueStore, key: &str) -> Cart {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "No persisted cart, starting empty");
            return Cart::new();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read persisted cart, starting empty");
            return Cart::new();
        }
    };

    let items: Vec<CartLineItem> = match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key, error = %e, "Malformed persisted cart, starting empty");
            return Cart::new();
        }
    };

    let stored = items.len();
    let cart = Cart::from_items(items);
    if cart.items().len() != stored {
        tracing::warn!(
            key,
            stored,
            kept = cart.items().len(),
            "Dropped invalid or duplicate lines from persisted cart"
        );
    }
    tracing::info!(key, lines = cart.items().len(), "Hydrated cart");
    cart
}
