use crate::domain::entities::component_group::GroupId;
use crate::domain::value_objects::collapse_mode::CollapseMode;

/// Partial update of a group. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateComponentGroupCommand {
    pub group_id: GroupId,
    pub name: Option<String>,
    pub order: Option<i64>,
    pub collapsed: Option<CollapseMode>,
    /// Dropped if it would make the group its own ancestor
    pub parent_id: Option<GroupId>,
}

impl UpdateComponentGroupCommand {
    #[must_use]
    pub fn new(group_id: GroupId) -> Self {
        Self {
            group_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub const fn collapsed(mut self, collapsed: CollapseMode) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    #[must_use]
    pub const fn parent_id(mut self, parent_id: GroupId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.order.is_none()
            && self.collapsed.is_none()
            && self.parent_id.is_none()
    }
}

/// Delete a group, handing its members and subgroups to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveComponentGroupCommand {
    pub group_id: GroupId,
}

impl RemoveComponentGroupCommand {
    #[must_use]
    pub const fn new(group_id: GroupId) -> Self {
        Self { group_id }
    }
}
