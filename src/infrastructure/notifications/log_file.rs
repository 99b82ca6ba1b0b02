use std::io::Write;
use std::path::PathBuf;

use crate::domain::entities::group_event::GroupEvent;
use crate::domain::ports::notifier::{NotificationError, Notifier};

const DEFAULT_LOG_PATH: &str = "~/.local/share/statusboard/events.log";

/// Appends one JSON object per group event to a file (audit trail).
pub struct LogFileNotifier {
    path: PathBuf,
}

impl LogFileNotifier {
    #[must_use]
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path);
        Self {
            path: PathBuf::from(expanded.as_ref()),
        }
    }

    fn append_json_line(&self, value: &serde_json::Value) -> Result<(), NotificationError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NotificationError::SendFailed(format!("cannot create log directory: {e}"))
            })?;
        }

        let json = serde_json::to_string(value)
            .map_err(|e| NotificationError::SendFailed(format!("JSON serialization error: {e}")))?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| NotificationError::SendFailed(format!("cannot open log file: {e}")))?;

        writeln!(file, "{json}")
            .map_err(|e| NotificationError::SendFailed(format!("cannot write log file: {e}")))
    }
}

impl Default for LogFileNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

impl Notifier for LogFileNotifier {
    fn notify(&self, event: &GroupEvent) -> Result<(), NotificationError> {
        let entry = serde_json::json!({
            "timestamp": event.timestamp.to_rfc3339(),
            "event": event.kind.name(),
            "group": {
                "id": event.group.id,
                "name": event.group.name,
                "order": event.group.order,
                "parent_id": event.group.parent_id,
                "collapsed": event.group.collapsed.as_str(),
            },
        });

        self.append_json_line(&entry)
    }
}
