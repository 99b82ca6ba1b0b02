use serde::{Deserialize, Serialize};

use crate::domain::entities::component_group::{GroupId, UNGROUPED};
use crate::domain::value_objects::component_status::ComponentStatus;

pub type ComponentId = i64;

/// A leaf monitored entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    /// Owning group, or [`UNGROUPED`]
    pub group_id: GroupId,
    pub status: ComponentStatus,
    pub enabled: bool,
    pub order: i64,
}

impl Component {
    #[must_use]
    pub const fn is_grouped(&self) -> bool {
        self.group_id != UNGROUPED
    }
}

/// Fields needed to create a component; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComponent {
    pub name: String,
    pub group_id: GroupId,
    pub status: ComponentStatus,
    pub enabled: bool,
    pub order: i64,
}

impl NewComponent {
    #[must_use]
    pub fn new(name: impl Into<String>, group_id: GroupId, status: ComponentStatus) -> Self {
        Self {
            name: name.into(),
            group_id,
            status,
            enabled: true,
            order: 0,
        }
    }

    #[must_use]
    pub const fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[must_use]
    pub fn into_component(self, id: ComponentId) -> Component {
        Component {
            id,
            name: self.name,
            group_id: self.group_id,
            status: self.status,
            enabled: self.enabled,
            order: self.order,
        }
    }
}
