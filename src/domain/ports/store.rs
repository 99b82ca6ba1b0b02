use thiserror::Error;

use crate::domain::entities::component::{Component, ComponentId, NewComponent};
use crate::domain::entities::component_group::{ComponentGroup, GroupId, NewComponentGroup};
use crate::domain::entities::group_tree::GroupTree;
use crate::domain::value_objects::component_status::ComponentStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    ReadFailed(String),
    #[error("storage write failed: {0}")]
    WriteFailed(String),
    #[error("entry not found: {0}")]
    NotFound(String),
    #[error("malformed group tree: group {0} is its own ancestor")]
    MalformedTree(GroupId),
}

/// Read primitives over the group hierarchy.
///
/// Sequences are ordered by `order`, ties broken by id. Group id `0` stands
/// for the root: its children are the top-level groups and its components
/// are the ungrouped ones.
pub trait TreeReader {
    /// Look up a single group.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn group(&self, id: GroupId) -> Result<Option<ComponentGroup>, StoreError>;

    /// Groups whose `parent_id` is `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn direct_children(&self, parent_id: GroupId) -> Result<Vec<ComponentGroup>, StoreError>;

    /// Components whose `group_id` is `group_id`, optionally only enabled ones.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn direct_components(
        &self,
        group_id: GroupId,
        enabled_only: bool,
    ) -> Result<Vec<Component>, StoreError>;
}

/// Writes available inside [`TreeStore::atomically`].
pub trait TreeTransaction: TreeReader {
    /// Overwrite an existing group row.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the group does not exist, or
    /// `StoreError::WriteFailed` if the write fails.
    fn save_group(&mut self, group: &ComponentGroup) -> Result<(), StoreError>;

    /// Move a component to another group (or to `0`, ungrouped).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the component does not exist, or
    /// `StoreError::WriteFailed` if the write fails.
    fn assign_component(
        &mut self,
        component_id: ComponentId,
        group_id: GroupId,
    ) -> Result<(), StoreError>;

    /// Delete a group row. Children and members are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the group does not exist, or
    /// `StoreError::WriteFailed` if the write fails.
    fn delete_group(&mut self, id: GroupId) -> Result<(), StoreError>;
}

/// Body of an atomic unit of work.
pub type TransactionOp<'a> = dyn FnMut(&mut dyn TreeTransaction) -> Result<(), StoreError> + 'a;

pub trait TreeStore: TreeReader + Send + Sync {
    /// Consistent copy of every group and component.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn snapshot(&self) -> Result<GroupTree, StoreError>;

    /// Run `op` as a single atomic unit: either every write it performs is
    /// committed or none is. Calls are serialized against each other.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `op` (after rolling back), or
    /// `StoreError::WriteFailed` if the commit fails.
    fn atomically(&self, op: &mut TransactionOp<'_>) -> Result<(), StoreError>;

    /// Persist a new group and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the parent group does not exist, or
    /// `StoreError::WriteFailed` if the write fails.
    fn create_group(&self, group: NewComponentGroup) -> Result<ComponentGroup, StoreError>;

    /// Persist a new component and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the owning group does not exist, or
    /// `StoreError::WriteFailed` if the write fails.
    fn create_component(&self, component: NewComponent) -> Result<Component, StoreError>;

    /// Change the status level of a component.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the component does not exist, or
    /// `StoreError::WriteFailed` if the write fails.
    fn set_component_status(
        &self,
        id: ComponentId,
        status: ComponentStatus,
    ) -> Result<Component, StoreError>;
}
