//! User-visible notices (toasts).
//!
//! One-shot messages with a title, a description and a severity. Delivery is
//! fire-and-forget; nothing acknowledges a notice.

use serde::{Deserialize, Serialize};

use super::wishlist::WishlistChange;

/// How prominently a notice should be displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    #[default]
    Default,
    Destructive,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub severity: NoticeSeverity,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: NoticeSeverity::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Destructive,
            ..Self::new(title, description)
        }
    }

    /// Shown when a wishlist action is attempted without a signed-in user.
    pub fn sign_in_required() -> Self {
        Self::new(
            "Sign in required",
            "Please sign in to add items to your wishlist",
        )
    }

    /// Shown after a wishlist toggle succeeds.
    pub fn wishlist_changed(change: WishlistChange) -> Self {
        match change {
            WishlistChange::Added => Self::new(
                "Added to Wishlist",
                "Product has been added to your wishlist",
            ),
            WishlistChange::Removed => Self::new(
                "Removed from Wishlist",
                "Product has been removed from your wishlist",
            ),
        }
    }

    /// Shown when a wishlist toggle fails remotely.
    pub fn wishlist_failed() -> Self {
        Self::destructive("Error", "Failed to update wishlist. Please try again.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wishlist_notices_distinguish_added_and_removed() {
        assert_eq!(Notice::wishlist_changed(WishlistChange::Added).title, "Added to Wishlist");
        assert_eq!(
            Notice::wishlist_changed(WishlistChange::Removed).title,
            "Removed from Wishlist"
        );
    }

    #[test]
    fn failure_notice_is_destructive() {
        let notice = Notice::wishlist_failed();
        assert_eq!(notice.severity, NoticeSeverity::Destructive);
        assert_eq!(notice.title, "Error");
    }

    #[test]
    fn sign_in_notice_uses_default_severity() {
        let notice = Notice::sign_in_required();
        assert_eq!(notice.title, "Sign in required");
        assert_eq!(notice.severity, NoticeSeverity::Default);
    }
}
