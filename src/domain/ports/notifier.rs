use thiserror::Error;

use crate::domain::entities::group_event::GroupEvent;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
    #[error("notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

/// Subscriber side of group mutations (cache invalidation, audit, push).
pub trait Notifier: Send + Sync {
    /// Deliver a committed group event.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the notification fails to send
    /// or the channel is unavailable.
    fn notify(&self, event: &GroupEvent) -> Result<(), NotificationError>;
}
