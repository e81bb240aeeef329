//! Product reviews, read-only from this layer.

mod rating;

pub use rating::StarRating;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProductId, ReviewId, Timestamp, UserId};

/// A customer's review of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReview {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub rating: StarRating,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub customer_id: UserId,
}

/// Aggregate figures over a product's reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    pub count: usize,
    /// Mean rating rounded to one decimal; `None` without reviews.
    pub average: Option<f64>,
    /// Number of reviews per star, index 0 holding one-star reviews.
    pub distribution: [usize; 5],
}

impl ReviewSummary {
    pub fn from_reviews(reviews: &[ProductReview]) -> Self {
        let mut distribution = [0usize; 5];
        let mut total: u64 = 0;
        for review in reviews {
            let stars = review.rating.value();
            distribution[usize::from(stars - StarRating::MIN)] += 1;
            total += u64::from(stars);
        }

        let average = if reviews.is_empty() {
            None
        } else {
            let mean = total as f64 / reviews.len() as f64;
            Some((mean * 10.0).round() / 10.0)
        };

        Self {
            count: reviews.len(),
            average,
            distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(stars: i16) -> ProductReview {
        ProductReview {
            id: ReviewId::new(format!("r{}", stars)).unwrap(),
            product_id: ProductId::new("p1").unwrap(),
            rating: StarRating::new(stars).unwrap(),
            title: None,
            comment: Some("Fresh".to_string()),
            created_at: Timestamp::now(),
            customer_id: UserId::new("u1").unwrap(),
        }
    }

    #[test]
    fn summary_of_no_reviews_has_no_average() {
        let summary = ReviewSummary::from_reviews(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, None);
        assert_eq!(summary.distribution, [0; 5]);
    }

    #[test]
    fn summary_rounds_average_to_one_decimal() {
        let summary = ReviewSummary::from_reviews(&[review(5), review(4), review(4)]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, Some(4.3));
        assert_eq!(summary.distribution, [0, 0, 0, 2, 1]);
    }
}
