//! Wishlist repository port.
//!
//! Defines the contract for the remote `wishlist` table, rows of
//! `(user_id, product_id)`. The client never owns this data; it reads the
//! membership set and issues single-row inserts and deletes.
//!
//! # Example
//!
//! ```ignore
//! async fn add(repo: &dyn WishlistRepository, user: &UserId, product: &ProductId)
//!     -> Result<(), RepositoryError>
//! {
//!     if !repo.list_product_ids(user).await?.contains(product) {
//!         repo.insert(user, product).await?;
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{ProductId, UserId};

/// Errors returned by remote table adapters.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid data in remote row: {0}")]
    InvalidData(String),

    #[error("Remote service unavailable: {0}")]
    Unavailable(String),
}

/// Repository port for the remote wishlist table.
///
/// Implementations must:
/// - Scope every statement to the given user
/// - Treat inserting an existing row and deleting a missing row as success
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// `select product_id where user_id = user`
    async fn list_product_ids(&self, user_id: &UserId) -> Result<Vec<ProductId>, RepositoryError>;

    /// `insert (user_id, product_id)`
    async fn insert(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), RepositoryError>;

    /// `delete where user_id = user and product_id = product`
    async fn delete(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), RepositoryError>;
}
