use crate::application::commands::{RemoveComponentGroupCommand, UpdateComponentGroupCommand};
use crate::domain::entities::component_group::{ComponentGroup, GroupId, ROOT};
use crate::domain::entities::group_event::GroupEvent;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::store::{StoreError, TreeStore, TreeTransaction};
use crate::domain::rollup::descendant_group_ids;

/// Applies group mutations while keeping the hierarchy a forest.
///
/// Each mutation runs inside a single store transaction; the resulting event
/// is sent once the transaction has committed.
pub struct GroupMutationService<'a> {
    store: &'a dyn TreeStore,
    notifier: &'a dyn Notifier,
}

impl<'a> GroupMutationService<'a> {
    #[must_use]
    pub fn new(store: &'a dyn TreeStore, notifier: &'a dyn Notifier) -> Self {
        Self { store, notifier }
    }

    /// Apply the present fields of `cmd` to its group.
    ///
    /// A proposed parent that is the group itself, one of its descendants, or
    /// a group that does not exist is silently ignored; the other fields are
    /// still applied.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown group,
    /// `StoreError::MalformedTree` if the stored hierarchy already contains a
    /// cycle, or any storage error. Nothing is written on error.
    pub fn update_group(
        &self,
        cmd: &UpdateComponentGroupCommand,
    ) -> Result<ComponentGroup, StoreError> {
        let mut updated = None;
        self.store
            .atomically(&mut |tx: &mut dyn TreeTransaction| {
                let group = require_group(tx, cmd.group_id)?;
                let group = apply_update(tx, group, cmd)?;
                tx.save_group(&group)?;
                updated = Some(group);
                Ok(())
            })?;
        let group = updated
            .ok_or_else(|| StoreError::WriteFailed("update produced no group".into()))?;

        tracing::info!(
            group_id = group.id,
            parent_id = group.parent_id,
            "Component group updated"
        );
        self.publish(&GroupEvent::updated(group.clone()));
        Ok(group)
    }

    /// Delete a group after handing its direct components and direct
    /// subgroups to its parent. Returns the group as it was before removal.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown group, or any storage
    /// error. Nothing is written on error.
    pub fn remove_group(
        &self,
        cmd: &RemoveComponentGroupCommand,
    ) -> Result<ComponentGroup, StoreError> {
        let mut removed = None;
        self.store
            .atomically(&mut |tx: &mut dyn TreeTransaction| {
                let group = require_group(tx, cmd.group_id)?;

                for component in tx.direct_components(group.id, false)? {
                    tx.assign_component(component.id, group.parent_id)?;
                }
                for mut child in tx.direct_children(group.id)? {
                    child.parent_id = group.parent_id;
                    tx.save_group(&child)?;
                }
                tx.delete_group(group.id)?;

                removed = Some(group);
                Ok(())
            })?;
        let group = removed
            .ok_or_else(|| StoreError::WriteFailed("removal produced no group".into()))?;

        tracing::info!(
            group_id = group.id,
            parent_id = group.parent_id,
            "Component group removed"
        );
        self.publish(&GroupEvent::removed(group.clone()));
        Ok(group)
    }

    fn publish(&self, event: &GroupEvent) {
        if let Err(e) = self.notifier.notify(event) {
            tracing::warn!("Group event notification failed: {e}");
        }
    }
}

fn require_group(tx: &dyn TreeTransaction, id: GroupId) -> Result<ComponentGroup, StoreError> {
    tx.group(id)?
        .ok_or_else(|| StoreError::NotFound(format!("group {id}")))
}

fn apply_update(
    tx: &dyn TreeTransaction,
    mut group: ComponentGroup,
    cmd: &UpdateComponentGroupCommand,
) -> Result<ComponentGroup, StoreError> {
    let mut forbidden = descendant_group_ids(tx, group.id)?;
    forbidden.insert(group.id);

    if let Some(parent_id) = cmd.parent_id {
        if forbidden.contains(&parent_id) {
            tracing::debug!(
                group_id = group.id,
                parent_id,
                "Ignoring parent: would create a cycle"
            );
        } else if parent_id != ROOT && tx.group(parent_id)?.is_none() {
            tracing::debug!(
                group_id = group.id,
                parent_id,
                "Ignoring parent: no such group"
            );
        } else {
            group.parent_id = parent_id;
        }
    }
    if let Some(name) = &cmd.name {
        group.name.clone_from(name);
    }
    if let Some(order) = cmd.order {
        group.order = order;
    }
    if let Some(collapsed) = cmd.collapsed {
        group.collapsed = collapsed;
    }
    Ok(group)
}
