//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types that form the
//! vocabulary of the marketplace client.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{LineItemId, ProductId, ReviewId, SellerId, UserId};
pub use timestamp::Timestamp;
