//! PostgreSQL implementation of WishlistRepository.
//!
//! Talks to the hosted backend's `wishlist` table, rows of
//! `(user_id uuid, product_id uuid)`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{ProductId, UserId};
use crate::ports::{RepositoryError, WishlistRepository};

/// PostgreSQL implementation of the WishlistRepository port.
pub struct PostgresWishlistRepository {
    pool: PgPool,
}

impl PostgresWishlistRepository {
    /// Creates a new PostgresWishlistRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(super) fn parse_uuid(field: &str, value: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(value).map_err(|e| {
        RepositoryError::InvalidData(format!("{} must be a valid UUID: {}", field, e))
    })
}

pub(super) fn database_error(action: &str, e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Unavailable(format!("Failed to {}: {}", action, e))
        }
        other => RepositoryError::Database(format!("Failed to {}: {}", action, other)),
    }
}

#[async_trait]
impl WishlistRepository for PostgresWishlistRepository {
    async fn list_product_ids(&self, user_id: &UserId) -> Result<Vec<ProductId>, RepositoryError> {
        let user_uuid = parse_uuid("user_id", user_id.as_str())?;

        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT product_id
            FROM wishlist
            WHERE user_id = $1
            "#,
        )
        .bind(user_uuid)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("load wishlist", e))?;

        rows.into_iter()
            .map(|(product_id,)| {
                ProductId::new(product_id.to_string())
                    .map_err(|e| RepositoryError::InvalidData(e.to_string()))
            })
            .collect()
    }

    async fn insert(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), RepositoryError> {
        let user_uuid = parse_uuid("user_id", user_id.as_str())?;
        let product_uuid = parse_uuid("product_id", product_id.as_str())?;

        sqlx::query(
            r#"
            INSERT INTO wishlist (user_id, product_id)
            SELECT $1, $2
            WHERE NOT EXISTS (
                SELECT 1 FROM wishlist WHERE user_id = $1 AND product_id = $2
            )
            "#,
        )
        .bind(user_uuid)
        .bind(product_uuid)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("add to wishlist", e))?;

        tracing::info!(user_id = %user_id, product_id = %product_id, "Wishlist row inserted");
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), RepositoryError> {
        let user_uuid = parse_uuid("user_id", user_id.as_str())?;
        let product_uuid = parse_uuid("product_id", product_id.as_str())?;

        let result = sqlx::query(
            r#"
            DELETE FROM wishlist
            WHERE user_id = $1 AND product_id = $2
            "#,
        )
        .bind(user_uuid)
        .bind(product_uuid)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("remove from wishlist", e))?;

        tracing::info!(
            user_id = %user_id,
            product_id = %product_id,
            rows = result.rows_affected(),
            "Wishlist row deleted"
        );
        Ok(())
    }
}
