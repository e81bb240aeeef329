//! Notifier adapters.
//!
//! - `TracingNotifier` - Writes notices to the log
//! - `RecordingNotifier` - Captures notices for test assertions

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::notice::{Notice, NoticeSeverity};
use crate::ports::Notifier;

/// Emits every notice as a tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            NoticeSeverity::Default => {
                tracing::info!(title = %notice.title, "{}", notice.description)
            }
            NoticeSeverity::Destructive => {
                tracing::warn!(title = %notice.title, "{}", notice.description)
            }
        }
    }
}

/// Keeps every notice it receives.
///
/// # Example
///
/// ```ignore
/// let notifier = Arc::new(RecordingNotifier::new());
/// store.toggle_wishlist(&product).await;
/// assert!(notifier.has_title("Added to Wishlist"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<RwLock<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all notices received so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    /// Checks if a notice with this title was received.
    pub fn has_title(&self, title: &str) -> bool {
        self.notices().iter().any(|n| n.title == title)
    }

    pub fn count(&self) -> usize {
        self.notices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear(&self) {
        self.notices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
