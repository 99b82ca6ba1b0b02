use crate::domain::entities::group_event::GroupEvent;
use crate::domain::ports::notifier::{NotificationError, Notifier};

/// Fans a group event out to every configured channel.
///
/// A failing channel does not stop delivery to the others; the first error
/// is returned once all channels have been tried.
pub struct CompositeNotifier {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl CompositeNotifier {
    #[must_use]
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for CompositeNotifier {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Notifier for CompositeNotifier {
    fn notify(&self, event: &GroupEvent) -> Result<(), NotificationError> {
        let mut first_error = None;
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(event) {
                tracing::warn!(
                    event = %event.kind,
                    group_id = event.group.id,
                    "Notification channel failed: {e}"
                );
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
