//! Identity provider port.
//!
//! Supplies the currently authenticated user, if any. Wishlist operations are
//! gated on its presence; the provider itself handles sign-in and sign-out.

use crate::domain::foundation::UserId;

/// Reports who is signed in right now.
///
/// # Contract
///
/// Implementations must return the same answer for repeated calls until the
/// session changes, and must never block on the network.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}
