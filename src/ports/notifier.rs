//! Notifier port - the user-visible notice channel.
//!
//! Fire-and-forget: `notify` has no return value and implementations must not
//! panic, because a notice may arrive after the screen that caused it is gone.

use crate::domain::notice::Notice;

/// Port for surfacing one-shot notices to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
