//! Wishlist domain - the membership set of a single user.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::ProductId;

/// The set of product identifiers a user has wishlisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishlistMembership {
    product_ids: BTreeSet<ProductId>,
}

impl WishlistMembership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.product_ids.contains(product_id)
    }

    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }

    /// Product ids in ascending order.
    pub fn product_ids(&self) -> impl Iterator<Item = &ProductId> {
        self.product_ids.iter()
    }
}

impl FromIterator<ProductId> for WishlistMembership {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self {
            product_ids: iter.into_iter().collect(),
        }
    }
}

/// Outcome of a successful wishlist toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistChange {
    Added,
    Removed,
}

impl WishlistChange {
    /// The change a toggle makes given current membership.
    pub fn for_membership(is_member: bool) -> Self {
        if is_member {
            WishlistChange::Removed
        } else {
            WishlistChange::Added
        }
    }
}
