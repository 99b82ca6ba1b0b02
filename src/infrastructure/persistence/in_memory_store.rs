use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::component::{Component, ComponentId, NewComponent};
use crate::domain::entities::component_group::{ComponentGroup, GroupId, NewComponentGroup, ROOT};
use crate::domain::entities::group_tree::GroupTree;
use crate::domain::ports::store::{StoreError, TransactionOp, TreeReader, TreeStore};
use crate::domain::value_objects::component_status::ComponentStatus;

struct State {
    tree: GroupTree,
    next_group_id: GroupId,
    next_component_id: ComponentId,
}

/// In-memory store for tests and embedding.
///
/// A single mutex guards the whole tree, so every transaction runs alone.
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::from_tree(GroupTree::new())
    }

    /// Seed the store with existing rows; new ids continue after the largest
    /// seeded id.
    #[must_use]
    pub fn from_tree(tree: GroupTree) -> Self {
        let next_group_id = tree.groups().map(|g| g.id).max().unwrap_or(0) + 1;
        let next_component_id = tree.components().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(State {
                tree,
                next_group_id,
                next_component_id,
            }),
        }
    }

    fn read(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))
    }

    fn write(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeReader for InMemoryStore {
    fn group(&self, id: GroupId) -> Result<Option<ComponentGroup>, StoreError> {
        self.read()?.tree.group(id)
    }

    fn direct_children(&self, parent_id: GroupId) -> Result<Vec<ComponentGroup>, StoreError> {
        self.read()?.tree.direct_children(parent_id)
    }

    fn direct_components(
        &self,
        group_id: GroupId,
        enabled_only: bool,
    ) -> Result<Vec<Component>, StoreError> {
        self.read()?.tree.direct_components(group_id, enabled_only)
    }
}

impl TreeStore for InMemoryStore {
    fn snapshot(&self) -> Result<GroupTree, StoreError> {
        Ok(self.read()?.tree.clone())
    }

    fn atomically(&self, op: &mut TransactionOp<'_>) -> Result<(), StoreError> {
        let mut state = self.write()?;
        let mut working = state.tree.clone();
        op(&mut working)?;
        state.tree = working;
        drop(state);
        Ok(())
    }

    fn create_group(&self, group: NewComponentGroup) -> Result<ComponentGroup, StoreError> {
        let mut state = self.write()?;
        if group.parent_id != ROOT && state.tree.get_group(group.parent_id).is_none() {
            return Err(StoreError::NotFound(format!("group {}", group.parent_id)));
        }
        let created = group.into_group(state.next_group_id);
        state.next_group_id += 1;
        state.tree.insert_group(created.clone());
        drop(state);
        Ok(created)
    }

    fn create_component(&self, component: NewComponent) -> Result<Component, StoreError> {
        let mut state = self.write()?;
        if component.group_id != ROOT && state.tree.get_group(component.group_id).is_none() {
            return Err(StoreError::NotFound(format!("group {}", component.group_id)));
        }
        let created = component.into_component(state.next_component_id);
        state.next_component_id += 1;
        state.tree.insert_component(created.clone());
        drop(state);
        Ok(created)
    }

    fn set_component_status(
        &self,
        id: ComponentId,
        status: ComponentStatus,
    ) -> Result<Component, StoreError> {
        self.write()?
            .tree
            .set_component_status(id, status)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("component {id}")))
    }
}
