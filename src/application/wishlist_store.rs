//! WishlistStore - the signed-in user's wishlist, synced against the remote table.
//!
//! The store owns no durable state. Membership is fetched per user into a
//! [`QueryCache`] and invalidated after each successful toggle.
//!
//! Toggles on the same product are serialized: each holds a per-product lock
//! for the whole decide / mutate / invalidate sequence and decides from a
//! fresh membership set, so two quick toggles cannot both act on a stale
//! snapshot. Toggles on different products proceed independently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::domain::foundation::{ProductId, UserId};
use crate::domain::notice::Notice;
use crate::domain::wishlist::{WishlistChange, WishlistMembership};
use crate::ports::{IdentityProvider, Notifier, RepositoryError, WishlistRepository};

use super::QueryCache;

/// Errors returned by wishlist operations.
///
/// Both variants have already been surfaced to the user as a notice by the
/// time the caller sees them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WishlistError {
    #[error("Sign in required")]
    Unauthenticated,

    #[error("Wishlist update failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Counts an in-flight operation for as long as it lives, including when the
/// owning future is dropped mid-await.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

type ProductLock = Arc<tokio::sync::Mutex<()>>;
type ProductLocks = Mutex<HashMap<ProductId, ProductLock>>;

/// A handle on one product's toggle lock. Dropping it removes the map entry
/// once no other toggle holds or awaits the lock, including when the owning
/// future is cancelled.
struct ProductLease<'a> {
    locks: &'a ProductLocks,
    product_id: ProductId,
    lock: ProductLock,
}

impl<'a> ProductLease<'a> {
    fn acquire(locks: &'a ProductLocks, product_id: &ProductId) -> Self {
        let lock = {
            let mut map = locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(map.entry(product_id.clone()).or_default())
        };
        Self {
            locks,
            product_id: product_id.clone(),
            lock,
        }
    }
}

impl Drop for ProductLease<'_> {
    fn drop(&mut self) {
        let mut map = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one held here.
        if Arc::strong_count(&self.lock) == 2 {
            map.remove(&self.product_id);
        }
    }
}

/// Wishlist container for the current user.
pub struct WishlistStore {
    repository: Arc<dyn WishlistRepository>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    cache: QueryCache<UserId, WishlistMembership>,
    product_locks: ProductLocks,
    fetches: AtomicUsize,
    toggles: AtomicUsize,
}

impl WishlistStore {
    pub fn new(
        repository: Arc<dyn WishlistRepository>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
        stale_after: Option<Duration>,
    ) -> Self {
        Self {
            repository,
            identity,
            notifier,
            cache: QueryCache::new(stale_after),
            product_locks: Mutex::new(HashMap::new()),
            fetches: AtomicUsize::new(0),
            toggles: AtomicUsize::new(0),
        }
    }

    /// Loads membership for the current user if it is missing or stale.
    ///
    /// Returns `Ok(None)` when nobody is signed in; the query is simply
    /// disabled in that case.
    ///
    /// # Errors
    ///
    /// Returns the repository failure. The previously cached set, if any,
    /// stays in place.
    pub async fn refresh(&self) -> Result<Option<WishlistMembership>, WishlistError> {
        let Some(user_id) = self.identity.current_user() else {
            return Ok(None);
        };
        if self.cache.is_fresh(&user_id) {
            return Ok(self.cache.get(&user_id));
        }
        self.fetch(&user_id).await.map(Some)
    }

    /// Membership test against the cached set of the current user.
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.identity
            .current_user()
            .and_then(|user_id| {
                self.cache
                    .read(&user_id, |membership| membership.contains(product_id))
            })
            .unwrap_or(false)
    }

    /// Cached membership of the current user, if it has been fetched.
    pub fn membership(&self) -> Option<WishlistMembership> {
        self.identity
            .current_user()
            .and_then(|user_id| self.cache.get(&user_id))
    }

    /// True while a membership fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.fetches.load(Ordering::SeqCst) > 0
    }

    /// True while any toggle is in flight or waiting on its product lock.
    pub fn is_toggling(&self) -> bool {
        self.toggles.load(Ordering::SeqCst) > 0
    }

    /// Adds the product if absent from the wishlist, removes it otherwise.
    ///
    /// Exactly one remote mutation is issued per call when a user is signed
    /// in. Every outcome is reported through the notifier.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if nobody is signed in; no remote call is made
    /// - `Repository` if the mutation (or the fetch it depends on) fails;
    ///   the cached membership is left as it was
    pub async fn toggle_wishlist(
        &self,
        product_id: &ProductId,
    ) -> Result<WishlistChange, WishlistError> {
        let Some(user_id) = self.identity.current_user() else {
            tracing::debug!(product_id = %product_id, "Wishlist toggle without user");
            self.notifier.notify(Notice::sign_in_required());
            return Err(WishlistError::Unauthenticated);
        };

        let _toggling = InFlight::enter(&self.toggles);
        let lease = ProductLease::acquire(&self.product_locks, product_id);
        let result = {
            let _serialized = lease.lock.lock().await;
            self.apply_toggle(&user_id, product_id).await
        };
        drop(lease);

        match &result {
            Ok(change) => self.notifier.notify(Notice::wishlist_changed(*change)),
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    product_id = %product_id,
                    error = %e,
                    "Wishlist toggle failed"
                );
                self.notifier.notify(Notice::wishlist_failed());
            }
        }
        result
    }

    async fn apply_toggle(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<WishlistChange, WishlistError> {
        let is_member = if self.cache.is_fresh(user_id) {
            self.cache
                .read(user_id, |membership| membership.contains(product_id))
                .unwrap_or(false)
        } else {
            self.fetch(user_id).await?.contains(product_id)
        };

        let change = WishlistChange::for_membership(is_member);
        match change {
            WishlistChange::Removed => self.repository.delete(user_id, product_id).await?,
            WishlistChange::Added => self.repository.insert(user_id, product_id).await?,
        }
        tracing::info!(user_id = %user_id, product_id = %product_id, ?change, "Wishlist updated");

        self.cache.invalidate(user_id);
        if let Err(e) = self.fetch(user_id).await {
            tracing::warn!(
                user_id = %user_id,
                error = %e,
                "Refetch after wishlist change failed; entry stays stale"
            );
        }
        Ok(change)
    }

    async fn fetch(&self, user_id: &UserId) -> Result<WishlistMembership, WishlistError> {
        let _loading = InFlight::enter(&self.fetches);
        match self.repository.list_product_ids(user_id).await {
            Ok(product_ids) => {
                let membership: WishlistMembership = product_ids.into_iter().collect();
                tracing::debug!(user_id = %user_id, count = membership.len(), "Fetched wishlist");
                self.cache.insert(user_id.clone(), membership.clone());
                Ok(membership)
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to fetch wishlist");
                Err(e.into())
            }
        }
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.product_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryWishlistRepository, RecordingNotifier, StaticIdentityProvider};

    struct Fixture {
        repo: InMemoryWishlistRepository,
        identity: StaticIdentityProvider,
        notifier: RecordingNotifier,
        store: Arc<WishlistStore>,
    }

    fn fixture(signed_in: bool) -> Fixture {
        let repo = InMemoryWishlistRepository::new();
        let identity = if signed_in {
            StaticIdentityProvider::signed_in(user())
        } else {
            StaticIdentityProvider::anonymous()
        };
        let notifier = RecordingNotifier::new();
        let store = Arc::new(WishlistStore::new(
            Arc::new(repo.clone()),
            Arc::new(identity.clone()),
            Arc::new(notifier.clone()),
            None,
        ));
        Fixture {
            repo,
            identity,
            notifier,
            store,
        }
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn product(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    #[tokio::test]
    async fn toggle_without_user_notifies_and_skips_remote() {
        let f = fixture(false);

        let result = f.store.toggle_wishlist(&product("p1")).await;

        assert!(matches!(result, Err(WishlistError::Unauthenticated)));
        assert_eq!(f.repo.mutation_calls(), 0);
        assert_eq!(f.repo.list_calls(), 0);
        assert!(f.notifier.has_title("Sign in required"));
        assert!(!f.store.is_in_wishlist(&product("p1")));
    }

    #[tokio::test]
    async fn toggle_adds_missing_product_and_refetches() {
        let f = fixture(true);
        f.store.refresh().await.unwrap();
        let lists_before = f.repo.list_calls();

        let change = f.store.toggle_wishlist(&product("p1")).await.unwrap();

        assert_eq!(change, WishlistChange::Added);
        assert_eq!(f.repo.insert_calls(), 1);
        assert_eq!(f.repo.delete_calls(), 0);
        assert_eq!(f.repo.list_calls(), lists_before + 1);
        assert!(f.store.is_in_wishlist(&product("p1")));
        assert_eq!(f.notifier.last().unwrap().title, "Added to Wishlist");
    }

    #[tokio::test]
    async fn toggle_removes_existing_product() {
        let f = fixture(true);
        f.repo.seed(&user(), &product("p1")).await;
        f.store.refresh().await.unwrap();
        assert!(f.store.is_in_wishlist(&product("p1")));

        let change = f.store.toggle_wishlist(&product("p1")).await.unwrap();

        assert_eq!(change, WishlistChange::Removed);
        assert_eq!(f.repo.delete_calls(), 1);
        assert!(!f.store.is_in_wishlist(&product("p1")));
        assert_eq!(f.notifier.last().unwrap().title, "Removed from Wishlist");
    }

    #[tokio::test]
    async fn failed_mutation_keeps_cached_state() {
        let f = fixture(true);
        f.store.refresh().await.unwrap();
        f.repo.set_fail_mutations(true);

        let result = f.store.toggle_wishlist(&product("p1")).await;

        assert!(matches!(result, Err(WishlistError::Repository(_))));
        assert!(!f.store.is_in_wishlist(&product("p1")));
        assert_eq!(f.notifier.last().unwrap().title, "Error");
        assert_eq!(f.repo.list_calls(), 1);
    }

    #[tokio::test]
    async fn refresh_without_user_is_disabled() {
        let f = fixture(false);
        assert!(f.store.refresh().await.unwrap().is_none());
        assert_eq!(f.repo.list_calls(), 0);
    }

    #[tokio::test]
    async fn refresh_uses_fresh_cache() {
        let f = fixture(true);
        f.store.refresh().await.unwrap();
        f.store.refresh().await.unwrap();
        assert_eq!(f.repo.list_calls(), 1);
    }

    #[tokio::test]
    async fn refresh_failure_keeps_previous_membership() {
        let f = fixture(true);
        f.repo.seed(&user(), &product("p1")).await;
        f.store.refresh().await.unwrap();

        f.store.cache.invalidate(&user());
        f.repo.set_fail_reads(true);
        let result = f.store.refresh().await;

        assert!(result.is_err());
        assert!(f.store.is_in_wishlist(&product("p1")));
        assert!(!f.store.is_loading());
    }

    #[tokio::test]
    async fn membership_is_scoped_to_current_user() {
        let f = fixture(true);
        f.repo.seed(&user(), &product("p1")).await;
        f.store.refresh().await.unwrap();

        f.identity.sign_in(UserId::new("user-2").unwrap());
        assert!(!f.store.is_in_wishlist(&product("p1")));
        assert!(f.store.membership().is_none());

        f.identity.sign_out();
        assert!(!f.store.is_in_wishlist(&product("p1")));
    }

    #[tokio::test]
    async fn toggle_before_first_fetch_decides_from_remote() {
        let f = fixture(true);
        f.repo.seed(&user(), &product("p1")).await;

        let change = f.store.toggle_wishlist(&product("p1")).await.unwrap();

        assert_eq!(change, WishlistChange::Removed);
        assert_eq!(f.repo.insert_calls(), 0);
    }

    #[tokio::test]
    async fn concurrent_toggles_on_same_product_apply_in_sequence() {
        let f = fixture(true);
        f.store.refresh().await.unwrap();
        f.repo.set_latency(Duration::from_millis(20));

        let first = tokio::spawn({
            let store = Arc::clone(&f.store);
            async move { store.toggle_wishlist(&product("p1")).await }
        });
        let second = tokio::spawn({
            let store = Arc::clone(&f.store);
            async move { store.toggle_wishlist(&product("p1")).await }
        });

        let mut changes = vec![
            first.await.unwrap().unwrap(),
            second.await.unwrap().unwrap(),
        ];
        changes.sort_by_key(|c| matches!(c, WishlistChange::Removed));

        assert_eq!(changes, vec![WishlistChange::Added, WishlistChange::Removed]);
        assert_eq!(f.repo.insert_calls(), 1);
        assert_eq!(f.repo.delete_calls(), 1);
        assert!(f.repo.rows_for(&user()).await.is_empty());
        assert!(!f.store.is_toggling());
        assert_eq!(f.store.tracked_locks(), 0);
    }

    #[tokio::test]
    async fn cancelled_toggle_releases_its_product_lock() {
        let f = fixture(true);
        f.repo.set_latency(Duration::from_millis(200));
        let p1 = product("p1");

        let outcome =
            tokio::time::timeout(Duration::from_millis(20), f.store.toggle_wishlist(&p1)).await;

        assert!(outcome.is_err());
        assert_eq!(f.store.tracked_locks(), 0);
        assert!(!f.store.is_toggling());
        assert!(!f.store.is_loading());
    }

    #[tokio::test]
    async fn cancelled_waiter_keeps_lock_for_active_toggle() {
        let f = fixture(true);
        f.repo.set_latency(Duration::from_millis(50));
        let p1 = product("p1");

        let active = tokio::spawn({
            let store = Arc::clone(&f.store);
            let p1 = p1.clone();
            async move { store.toggle_wishlist(&p1).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        let waiter =
            tokio::time::timeout(Duration::from_millis(5), f.store.toggle_wishlist(&p1)).await;
        assert!(waiter.is_err());
        assert_eq!(f.store.tracked_locks(), 1);

        assert_eq!(active.await.unwrap().unwrap(), WishlistChange::Added);
        assert_eq!(f.store.tracked_locks(), 0);
    }

    #[tokio::test]
    async fn detached_toggle_completes_after_handle_is_dropped() {
        let f = fixture(true);
        f.repo.set_latency(Duration::from_millis(10));

        let handle = tokio::spawn({
            let store = Arc::clone(&f.store);
            async move {
                let _ = store.toggle_wishlist(&product("p1")).await;
            }
        });
        drop(handle);

        for _ in 0..50 {
            if f.notifier.count() > 0 && !f.store.is_toggling() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(f.repo.rows_for(&user()).await, vec![product("p1")]);
        assert!(f.notifier.has_title("Added to Wishlist"));
    }
}
