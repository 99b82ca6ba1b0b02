use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::component_group::ComponentGroup;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GroupEventKind {
    Updated,
    Removed,
}

impl GroupEventKind {
    /// Dotted event name used in log lines and webhook payloads.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Updated => "component_group.updated",
            Self::Removed => "component_group.removed",
        }
    }
}

impl std::fmt::Display for GroupEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Emitted once a group mutation has been committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: GroupEventKind,
    /// The group after an update, or as it was just before removal
    pub group: ComponentGroup,
}

impl GroupEvent {
    #[must_use]
    pub fn updated(group: ComponentGroup) -> Self {
        Self {
            timestamp: Utc::now(),
            kind: GroupEventKind::Updated,
            group,
        }
    }

    #[must_use]
    pub fn removed(group: ComponentGroup) -> Self {
        Self {
            timestamp: Utc::now(),
            kind: GroupEventKind::Removed,
            group,
        }
    }
}
