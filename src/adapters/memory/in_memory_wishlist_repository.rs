//! In-memory wishlist table.
//!
//! Stands in for the remote `wishlist` table in tests and offline demos.
//! Supports failure injection, artificial latency and call counting so the
//! wishlist container's remote behaviour can be asserted.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::foundation::{ProductId, UserId};
use crate::ports::{RepositoryError, WishlistRepository};

/// In-memory storage for wishlist rows
#[derive(Debug, Clone, Default)]
pub struct InMemoryWishlistRepository {
    rows: Arc<RwLock<HashMap<UserId, BTreeSet<ProductId>>>>,
    fail_mutations: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
    latency_ms: Arc<AtomicUsize>,
    list_calls: Arc<AtomicUsize>,
    insert_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
}

impl InMemoryWishlistRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row without counting it as a call
    pub async fn seed(&self, user_id: &UserId, product_id: &ProductId) {
        self.rows
            .write()
            .await
            .entry(user_id.clone())
            .or_default()
            .insert(product_id.clone());
    }

    /// Make subsequent inserts and deletes fail
    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent selects fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Delay every call by the given duration
    pub fn set_latency(&self, latency: Duration) {
        let millis = usize::try_from(latency.as_millis()).unwrap_or(usize::MAX);
        self.latency_ms.store(millis, Ordering::SeqCst);
    }

    /// Products currently stored for a user
    pub async fn rows_for(&self, user_id: &UserId) -> Vec<ProductId> {
        self.rows
            .read()
            .await
            .get(user_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Total remote mutations issued
    pub fn mutation_calls(&self) -> usize {
        self.insert_calls() + self.delete_calls()
    }

    async fn simulate_latency(&self) {
        let millis = self.latency_ms.load(Ordering::SeqCst);
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis as u64)).await;
        }
    }

    fn check_mutation(&self) -> Result<(), RepositoryError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "Simulated mutation failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl WishlistRepository for InMemoryWishlistRepository {
    async fn list_product_ids(&self, user_id: &UserId) -> Result<Vec<ProductId>, RepositoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("Simulated read failure".to_string()));
        }
        Ok(self.rows_for(user_id).await)
    }

    async fn insert(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), RepositoryError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.check_mutation()?;
        self.seed(user_id, product_id).await;
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), RepositoryError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.check_mutation()?;
        if let Some(set) = self.rows.write().await.get_mut(user_id) {
            set.remove(product_id);
        }
        Ok(())
    }
}
