//! Settable identity provider.
//!
//! Holds the signed-in user in memory. The embedding application calls
//! [`StaticIdentityProvider::sign_in`] and [`StaticIdentityProvider::sign_out`]
//! as its auth session changes; tests use it to flip between states.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::foundation::UserId;
use crate::ports::IdentityProvider;

/// Identity provider backed by a shared, mutable slot.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    current: Arc<RwLock<Option<UserId>>>,
}

impl StaticIdentityProvider {
    /// Creates a provider with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a provider with the given user signed in.
    pub fn signed_in(user_id: UserId) -> Self {
        let provider = Self::default();
        provider.sign_in(user_id);
        provider
    }

    pub fn sign_in(&self, user_id: UserId) {
        tracing::debug!(user_id = %user_id, "User signed in");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user_id);
    }

    pub fn sign_out(&self) {
        tracing::debug!("User signed out");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_user(&self) -> Option<UserId> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
