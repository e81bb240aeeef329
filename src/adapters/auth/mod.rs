//! Authentication adapters.
//!
//! Implementations of the `IdentityProvider` port:
//!
//! - `static_identity` - In-memory provider fed by the embedding application

mod static_identity;

pub use static_identity::StaticIdentityProvider;
