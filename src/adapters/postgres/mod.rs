//! PostgreSQL adapters - Database implementations for the remote table ports.
//!
//! The hosted backend exposes a PostgreSQL database; these adapters talk to
//! its tables directly:
//! - `PostgresWishlistRepository` - The `wishlist` table
//! - `PostgresReviewReader` - Read-only `product_reviews` queries

mod review_reader;
mod wishlist_repository;

pub use review_reader::PostgresReviewReader;
pub use wishlist_repository::PostgresWishlistRepository;
