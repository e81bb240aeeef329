//! In-memory adapters for the remote table ports.
//!
//! Used by tests and by the binary when no database is configured.

mod in_memory_review_reader;
mod in_memory_wishlist_repository;

pub use in_memory_review_reader::InMemoryReviewReader;
pub use in_memory_wishlist_repository::InMemoryWishlistRepository;
