use serde::Serialize;

use crate::domain::entities::component::{Component, ComponentId};
use crate::domain::entities::component_group::{ComponentGroup, GroupId, UNGROUPED};
use crate::domain::entities::group_tree::GroupTree;
use crate::domain::ports::store::{StoreError, TreeReader, TreeStore};
use crate::domain::ports::translator::Translator;
use crate::domain::rollup;
use crate::domain::value_objects::collapse_mode::CollapseMode;
use crate::domain::value_objects::component_status::ComponentStatus;
use crate::domain::value_objects::status_color::StatusColor;

/// Display-ready state of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentView {
    pub id: ComponentId,
    pub name: String,
    pub status: ComponentStatus,
    pub status_color: StatusColor,
    pub human_status: String,
    pub order: i64,
}

/// Display-ready state of a group and, recursively, of its subgroups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupStatusView {
    pub id: GroupId,
    pub name: String,
    pub order: i64,
    pub parent_id: GroupId,
    pub collapsed: CollapseMode,
    /// Rolled-up status: operational, partial outage or major outage
    pub status: ComponentStatus,
    pub status_color: StatusColor,
    pub human_status: String,
    pub is_collapsed: bool,
    /// Worst enabled component anywhere in the subtree
    pub lowest_component_status: Option<ComponentStatus>,
    pub lowest_human_status: Option<String>,
    pub lowest_status_color: Option<StatusColor>,
    /// Enabled direct components
    pub components: Vec<ComponentView>,
    pub subgroups: Vec<GroupStatusView>,
}

/// The whole board: top-level groups plus components outside any group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBoard {
    pub groups: Vec<GroupStatusView>,
    pub ungrouped: Vec<ComponentView>,
}

impl StatusBoard {
    /// Worst status shown anywhere on the board.
    #[must_use]
    pub fn overall_status(&self) -> ComponentStatus {
        self.groups
            .iter()
            .map(|g| g.status)
            .chain(self.ungrouped.iter().map(|c| c.status))
            .max()
            .unwrap_or(ComponentStatus::Operational)
    }
}

/// Read side of the hierarchy: computes statuses from a store snapshot.
pub struct StatusBoardService<'a> {
    store: &'a dyn TreeStore,
    translator: &'a dyn Translator,
}

impl<'a> StatusBoardService<'a> {
    #[must_use]
    pub fn new(store: &'a dyn TreeStore, translator: &'a dyn Translator) -> Self {
        Self { store, translator }
    }

    /// View of a single group with its subtree.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown group,
    /// `StoreError::MalformedTree` if its subtree contains a cycle, or any
    /// storage error.
    pub fn group_view(&self, id: GroupId) -> Result<GroupStatusView, StoreError> {
        let tree = self.store.snapshot()?;
        let group = tree
            .group(id)?
            .ok_or_else(|| StoreError::NotFound(format!("group {id}")))?;
        self.view_of(&tree, &group)
    }

    /// Every top-level group with its subtree, and the ungrouped components.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MalformedTree` if the hierarchy contains a cycle,
    /// or any storage error.
    pub fn board(&self) -> Result<StatusBoard, StoreError> {
        let tree = self.store.snapshot()?;
        let groups = tree
            .direct_children(UNGROUPED)?
            .iter()
            .map(|g| self.view_of(&tree, g))
            .collect::<Result<Vec<_>, _>>()?;
        let ungrouped = tree
            .direct_components(UNGROUPED, true)?
            .iter()
            .map(|c| self.component_view(c))
            .collect();
        Ok(StatusBoard { groups, ungrouped })
    }

    fn view_of(
        &self,
        tree: &GroupTree,
        group: &ComponentGroup,
    ) -> Result<GroupStatusView, StoreError> {
        // Fails on any cycle below this group before the recursion below runs.
        let status = rollup::group_status(tree, group)?;
        let lowest = rollup::lowest_component_status(tree, group)?;

        let components = tree
            .direct_components(group.id, true)?
            .iter()
            .map(|c| self.component_view(c))
            .collect();
        let subgroups = tree
            .direct_children(group.id)?
            .iter()
            .map(|child| self.view_of(tree, child))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GroupStatusView {
            id: group.id,
            name: group.name.clone(),
            order: group.order,
            parent_id: group.parent_id,
            collapsed: group.collapsed,
            status,
            status_color: status.color(),
            human_status: self.translator.translate_status(status),
            is_collapsed: rollup::is_collapsed(tree, group)?,
            lowest_component_status: lowest,
            lowest_human_status: lowest.map(|s| self.translator.translate_status(s)),
            lowest_status_color: lowest.map(ComponentStatus::color),
            components,
            subgroups,
        })
    }

    fn component_view(&self, component: &Component) -> ComponentView {
        ComponentView {
            id: component.id,
            name: component.name.clone(),
            status: component.status,
            status_color: component.status.color(),
            human_status: self.translator.translate_status(component.status),
            order: component.order,
        }
    }
}
