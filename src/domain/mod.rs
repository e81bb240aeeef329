//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `cart` - Line items and the cart aggregate
//! - `wishlist` - Wishlist membership set
//! - `notice` - User-visible notices
//! - `review` - Product reviews and their summary

pub mod cart;
pub mod foundation;
pub mod notice;
pub mod review;
pub mod wishlist;
