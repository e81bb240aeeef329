//! Product review reader port (read side).
//!
//! Read-only access to the remote `product_reviews` table.

use async_trait::async_trait;

use crate::domain::foundation::ProductId;
use crate::domain::review::ProductReview;

use super::RepositoryError;

/// Reader port for product reviews.
#[async_trait]
pub trait ProductReviewReader: Send + Sync {
    /// All reviews of a product, newest first (`created_at` descending).
    async fn list_for_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<ProductReview>, RepositoryError>;
}
