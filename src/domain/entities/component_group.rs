use serde::{Deserialize, Serialize};

use crate::domain::value_objects::collapse_mode::CollapseMode;

pub type GroupId = i64;

/// Parent id of a top-level group.
pub const ROOT: GroupId = 0;

/// Group id of a component that belongs to no group.
pub const UNGROUPED: GroupId = 0;

/// A named node of the component hierarchy.
///
/// Groups carry no status of their own: it is derived from the subtree on
/// every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentGroup {
    pub id: GroupId,
    pub name: String,
    pub order: i64,
    /// Parent group, or [`ROOT`]
    pub parent_id: GroupId,
    pub collapsed: CollapseMode,
}

impl ComponentGroup {
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id == ROOT
    }
}

/// Fields needed to create a group; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComponentGroup {
    pub name: String,
    pub order: i64,
    pub parent_id: GroupId,
    pub collapsed: CollapseMode,
}

impl NewComponentGroup {
    #[must_use]
    pub fn new(name: impl Into<String>, parent_id: GroupId) -> Self {
        Self {
            name: name.into(),
            order: 0,
            parent_id,
            collapsed: CollapseMode::default(),
        }
    }

    #[must_use]
    pub const fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub const fn with_collapsed(mut self, collapsed: CollapseMode) -> Self {
        self.collapsed = collapsed;
        self
    }

    #[must_use]
    pub fn into_group(self, id: GroupId) -> ComponentGroup {
        ComponentGroup {
            id,
            name: self.name,
            order: self.order,
            parent_id: self.parent_id,
            collapsed: self.collapsed,
        }
    }
}
