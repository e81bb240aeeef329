//! PostgreSQL implementation of ProductReviewReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{ProductId, ReviewId, Timestamp, UserId, ValidationError};
use crate::domain::review::{ProductReview, StarRating};
use crate::ports::{ProductReviewReader, RepositoryError};

use super::wishlist_repository::{database_error, parse_uuid};

/// Read-only access to the `product_reviews` table.
pub struct PostgresReviewReader {
    pool: PgPool,
}

impl PostgresReviewReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a review.
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    product_id: Uuid,
    rating: i32,
    title: Option<String>,
    comment: Option<String>,
    created_at: DateTime<Utc>,
    customer_id: Uuid,
}

impl TryFrom<ReviewRow> for ProductReview {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let review_id = row.id;
        let invalid = move |e: ValidationError| {
            RepositoryError::InvalidData(format!("review {}: {}", review_id, e))
        };
        let rating = i16::try_from(row.rating).unwrap_or(i16::MAX);

        Ok(ProductReview {
            id: ReviewId::new(row.id.to_string()).map_err(invalid)?,
            product_id: ProductId::new(row.product_id.to_string()).map_err(invalid)?,
            rating: StarRating::new(rating).map_err(invalid)?,
            title: row.title.filter(|t| !t.trim().is_empty()),
            comment: row.comment.filter(|c| !c.trim().is_empty()),
            created_at: Timestamp::from_datetime(row.created_at),
            customer_id: UserId::new(row.customer_id.to_string()).map_err(invalid)?,
        })
    }
}

#[async_trait]
impl ProductReviewReader for PostgresReviewReader {
    async fn list_for_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<ProductReview>, RepositoryError> {
        let product_uuid = parse_uuid("product_id", product_id.as_str())?;

        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT id, product_id, rating, title, comment, created_at, customer_id
            FROM product_reviews
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_uuid)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("load reviews", e))?;

        rows.into_iter().map(ProductReview::try_from).collect()
    }
}
