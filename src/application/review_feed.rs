//! Product review feed: reviews newest first plus their summary.

use std::sync::Arc;

use crate::domain::foundation::ProductId;
use crate::domain::review::{ProductReview, ReviewSummary};
use crate::ports::{ProductReviewReader, RepositoryError};

/// Reviews of one product as rendered on its detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductReviews {
    pub reviews: Vec<ProductReview>,
    pub summary: ReviewSummary,
}

pub struct ReviewFeed {
    reader: Arc<dyn ProductReviewReader>,
}

impl ReviewFeed {
    pub fn new(reader: Arc<dyn ProductReviewReader>) -> Self {
        Self { reader }
    }

    /// Loads a product's reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns the reader's failure unchanged.
    pub async fn load(&self, product_id: &ProductId) -> Result<ProductReviews, RepositoryError> {
        let mut reviews = self.reader.list_for_product(product_id).await?;
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let summary = ReviewSummary::from_reviews(&reviews);

        tracing::debug!(
            product_id = %product_id,
            count = summary.count,
            "Loaded product reviews"
        );
        Ok(ProductReviews { reviews, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryReviewReader;
    use crate::domain::foundation::{ReviewId, Timestamp, UserId};
    use crate::domain::review::StarRating;

    fn review(id: &str, product: &str, stars: i16, age_secs: i64) -> ProductReview {
        ProductReview {
            id: ReviewId::new(id).unwrap(),
            product_id: ProductId::new(product).unwrap(),
            rating: StarRating::new(stars).unwrap(),
            title: None,
            comment: None,
            created_at: Timestamp::now().minus_secs(age_secs),
            customer_id: UserId::new("u1").unwrap(),
        }
    }

    #[tokio::test]
    async fn loads_newest_first_with_summary() {
        let reader = InMemoryReviewReader::new();
        reader.add(review("old", "p1", 2, 300)).await;
        reader.add(review("new", "p1", 5, 10)).await;
        reader.add(review("other", "p2", 1, 5)).await;
        let feed = ReviewFeed::new(Arc::new(reader));

        let loaded = feed.load(&ProductId::new("p1").unwrap()).await.unwrap();

        let ids: Vec<_> = loaded.reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(loaded.summary.count, 2);
        assert_eq!(loaded.summary.average, Some(3.5));
    }

    #[tokio::test]
    async fn product_without_reviews_is_empty() {
        let feed = ReviewFeed::new(Arc::new(InMemoryReviewReader::new()));
        let loaded = feed.load(&ProductId::new("p9").unwrap()).await.unwrap();
        assert!(loaded.reviews.is_empty());
        assert_eq!(loaded.summary.average, None);
    }
}
