//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Local Ports
//!
//! - `KeyValueStore` - Durable storage slot for the persisted cart
//! - `Notifier` - One-shot user-visible notices
//! - `IdentityProvider` - The currently signed-in user
//!
//! ## Remote Table Ports
//!
//! - `WishlistRepository` - Rows of `(user_id, product_id)`
//! - `ProductReviewReader` - Read-only product reviews

mod identity_provider;
mod key_value_store;
mod notifier;
mod review_reader;
mod wishlist_repository;

pub use identity_provider::IdentityProvider;
pub use key_value_store::{KeyValueStore, StorageError};
pub use notifier::Notifier;
pub use review_reader::ProductReviewReader;
pub use wishlist_repository::{RepositoryError, WishlistRepository};
