//! Marketplace Client - cart and wishlist state for a local marketplace
//!
//! This crate holds the client-side state containers of the marketplace: a
//! persisted cart shared by every view, and a wishlist synced against the
//! remote `wishlist` table for the signed-in user.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
