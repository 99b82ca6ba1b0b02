use std::collections::{BTreeSet, HashMap};

use crate::domain::entities::component::{Component, ComponentId};
use crate::domain::entities::component_group::{ComponentGroup, GroupId};
use crate::domain::ports::store::{StoreError, TreeReader, TreeTransaction};
use crate::domain::value_objects::component_status::ComponentStatus;

/// Arena of groups and components indexed by id.
///
/// `children` maps a parent id to the ids of groups pointing at it and
/// `members` maps a group id to the ids of components pointing at it. Both
/// indexes follow the stored pointers, whether or not the target exists.
#[derive(Debug, Clone, Default)]
pub struct GroupTree {
    groups: HashMap<GroupId, ComponentGroup>,
    components: HashMap<ComponentId, Component>,
    children: HashMap<GroupId, BTreeSet<GroupId>>,
    members: HashMap<GroupId, BTreeSet<ComponentId>>,
}

impl GroupTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_parts(
        groups: impl IntoIterator<Item = ComponentGroup>,
        components: impl IntoIterator<Item = Component>,
    ) -> Self {
        let mut tree = Self::new();
        for group in groups {
            tree.insert_group(group);
        }
        for component in components {
            tree.insert_component(component);
        }
        tree
    }

    /// Insert or replace a group, keeping the parent index in sync.
    pub fn insert_group(&mut self, group: ComponentGroup) -> Option<ComponentGroup> {
        let previous = self.groups.remove(&group.id);
        if let Some(old) = &previous {
            unlink(&mut self.children, old.parent_id, old.id);
        }
        self.children
            .entry(group.parent_id)
            .or_default()
            .insert(group.id);
        self.groups.insert(group.id, group);
        previous
    }

    /// Insert or replace a component, keeping the membership index in sync.
    pub fn insert_component(&mut self, component: Component) -> Option<Component> {
        let previous = self.components.remove(&component.id);
        if let Some(old) = &previous {
            unlink(&mut self.members, old.group_id, old.id);
        }
        self.members
            .entry(component.group_id)
            .or_default()
            .insert(component.id);
        self.components.insert(component.id, component);
        previous
    }

    /// Drop a group row. Groups and components pointing at it keep their
    /// pointers.
    pub fn remove_group(&mut self, id: GroupId) -> Option<ComponentGroup> {
        let removed = self.groups.remove(&id)?;
        unlink(&mut self.children, removed.parent_id, id);
        Some(removed)
    }

    pub fn set_component_status(
        &mut self,
        id: ComponentId,
        status: ComponentStatus,
    ) -> Option<&Component> {
        let component = self.components.get_mut(&id)?;
        component.status = status;
        Some(component)
    }

    #[must_use]
    pub fn get_group(&self, id: GroupId) -> Option<&ComponentGroup> {
        self.groups.get(&id)
    }

    #[must_use]
    pub fn get_component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &ComponentGroup> {
        self.groups.values()
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

fn unlink(index: &mut HashMap<GroupId, BTreeSet<i64>>, key: GroupId, id: i64) {
    if let Some(ids) = index.get_mut(&key) {
        ids.remove(&id);
        if ids.is_empty() {
            index.remove(&key);
        }
    }
}

impl TreeReader for GroupTree {
    fn group(&self, id: GroupId) -> Result<Option<ComponentGroup>, StoreError> {
        Ok(self.groups.get(&id).cloned())
    }

    fn direct_children(&self, parent_id: GroupId) -> Result<Vec<ComponentGroup>, StoreError> {
        let mut children: Vec<ComponentGroup> = self
            .children
            .get(&parent_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.groups.get(id))
            .cloned()
            .collect();
        children.sort_by_key(|g| (g.order, g.id));
        Ok(children)
    }

    fn direct_components(
        &self,
        group_id: GroupId,
        enabled_only: bool,
    ) -> Result<Vec<Component>, StoreError> {
        let mut components: Vec<Component> = self
            .members
            .get(&group_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.components.get(id))
            .filter(|c| !enabled_only || c.enabled)
            .cloned()
            .collect();
        components.sort_by_key(|c| (c.order, c.id));
        Ok(components)
    }
}

impl TreeTransaction for GroupTree {
    fn save_group(&mut self, group: &ComponentGroup) -> Result<(), StoreError> {
        if !self.groups.contains_key(&group.id) {
            return Err(StoreError::NotFound(format!("group {}", group.id)));
        }
        self.insert_group(group.clone());
        Ok(())
    }

    fn assign_component(
        &mut self,
        component_id: ComponentId,
        group_id: GroupId,
    ) -> Result<(), StoreError> {
        let mut component = self
            .components
            .get(&component_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("component {component_id}")))?;
        component.group_id = group_id;
        self.insert_component(component);
        Ok(())
    }

    fn delete_group(&mut self, id: GroupId) -> Result<(), StoreError> {
        self.remove_group(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("group {id}")))
    }
}
