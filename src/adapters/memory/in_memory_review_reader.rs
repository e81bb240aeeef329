//! In-memory product review reader.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::ProductId;
use crate::domain::review::ProductReview;
use crate::ports::{ProductReviewReader, RepositoryError};

/// Holds reviews in memory and serves them newest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewReader {
    reviews: Arc<RwLock<Vec<ProductReview>>>,
}

impl InMemoryReviewReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, review: ProductReview) {
        self.reviews.write().await.push(review);
    }
}

#[async_trait]
impl ProductReviewReader for InMemoryReviewReader {
    async fn list_for_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<ProductReview>, RepositoryError> {
        let mut found: Vec<ProductReview> = self
            .reviews
            .read()
            .await
            .iter()
            .filter(|r| &r.product_id == product_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ReviewId, Timestamp, UserId};
    use crate::domain::review::StarRating;

    fn review(id: &str, product: &str, age_secs: i64) -> ProductReview {
        ProductReview {
            id: ReviewId::new(id).unwrap(),
            product_id: ProductId::new(product).unwrap(),
            rating: StarRating::new(4).unwrap(),
            title: Some("Good".to_string()),
            comment: None,
            created_at: Timestamp::now().minus_secs(age_secs),
            customer_id: UserId::new("u1").unwrap(),
        }
    }

    #[tokio::test]
    async fn lists_only_matching_product_newest_first() {
        let reader = InMemoryReviewReader::new();
        reader.add(review("old", "p1", 100)).await;
        reader.add(review("other", "p2", 10)).await;
        reader.add(review("new", "p1", 5)).await;

        let reviews = reader
            .list_for_product(&ProductId::new("p1").unwrap())
            .await
            .unwrap();

        let ids: Vec<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }
}
