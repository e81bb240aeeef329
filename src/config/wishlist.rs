//! Wishlist sync configuration

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WishlistConfig {
    /// Age after which cached membership is refetched. Unset keeps it fresh
    /// until a toggle invalidates it.
    #[serde(default)]
    pub stale_after_secs: Option<u64>,
}

impl WishlistConfig {
    pub fn stale_after(&self) -> Option<Duration> {
        self.stale_after_secs.map(Duration::from_secs)
    }
}
