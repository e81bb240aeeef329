//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Key-value stores for the persisted cart (file, in-memory)
//! - `postgres` - Remote tables of the hosted backend
//! - `memory` - In-memory stand-ins for the remote tables
//! - `notify` - Notice sinks
//! - `auth` - Identity providers

pub mod auth;
pub mod memory;
pub mod notify;
pub mod postgres;
pub mod storage;

pub use auth::StaticIdentityProvider;
pub use memory::{InMemoryReviewReader, InMemoryWishlistRepository};
pub use notify::{RecordingNotifier, TracingNotifier};
pub use postgres::{PostgresReviewReader, PostgresWishlistRepository};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
