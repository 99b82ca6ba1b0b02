pub mod traversal;

use std::collections::HashSet;

use crate::domain::entities::component::Component;
use crate::domain::entities::component_group::{ComponentGroup, GroupId};
use crate::domain::ports::store::{StoreError, TreeReader};
use crate::domain::value_objects::collapse_mode::CollapseMode;
use crate::domain::value_objects::component_status::ComponentStatus;

pub use traversal::descendant_group_ids;

/// Status of a group judged only from its own enabled components.
///
/// Components at level 1 or 2 are online, 3 or 4 are in outage. No
/// components or no outage gives operational, no online component gives a
/// major outage, anything in between a partial outage. The result is never
/// `PerformanceIssues`.
#[must_use]
pub fn immediate_status(components: &[Component]) -> ComponentStatus {
    let outages = components.iter().filter(|c| !c.status.is_online()).count();

    if outages == 0 {
        ComponentStatus::Operational
    } else if outages == components.len() {
        ComponentStatus::MajorOutage
    } else {
        ComponentStatus::PartialOutage
    }
}

/// Rolled-up status of a group: the worst of its immediate status and the
/// statuses of its direct subgroups, recursively.
///
/// Nothing is cached; each call walks the whole subtree.
///
/// # Errors
///
/// Returns `StoreError::MalformedTree` if a group turns out to be its own
/// ancestor, or any error raised by the reader.
pub fn group_status<R: TreeReader + ?Sized>(
    reader: &R,
    group: &ComponentGroup,
) -> Result<ComponentStatus, StoreError> {
    let mut path = HashSet::new();
    status_on_path(reader, group, &mut path)
}

fn status_on_path<R: TreeReader + ?Sized>(
    reader: &R,
    group: &ComponentGroup,
    path: &mut HashSet<GroupId>,
) -> Result<ComponentStatus, StoreError> {
    if !path.insert(group.id) {
        tracing::error!(group_id = group.id, "cycle in group hierarchy");
        return Err(StoreError::MalformedTree(group.id));
    }

    let immediate = immediate_status(&reader.direct_components(group.id, true)?);

    let mut subgroups = ComponentStatus::Operational;
    for child in reader.direct_children(group.id)? {
        subgroups = subgroups.max(status_on_path(reader, &child, path)?);
    }

    path.remove(&group.id);
    Ok(immediate.max(subgroups))
}

/// Every enabled component in the subtree of `group`, its own included,
/// ordered by `order` then id.
///
/// # Errors
///
/// Returns `StoreError::MalformedTree` on a cycle, or any error raised by
/// the reader.
pub fn subtree_components<R: TreeReader + ?Sized>(
    reader: &R,
    group: &ComponentGroup,
) -> Result<Vec<Component>, StoreError> {
    let mut components = reader.direct_components(group.id, true)?;
    for id in descendant_group_ids(reader, group.id)? {
        components.extend(reader.direct_components(id, true)?);
    }
    components.sort_by_key(|c| (c.order, c.id));
    Ok(components)
}

/// Worst status among the enabled components of the whole subtree, or
/// `None` when the subtree has none.
///
/// # Errors
///
/// Returns `StoreError::MalformedTree` on a cycle, or any error raised by
/// the reader.
pub fn lowest_component_status<R: TreeReader + ?Sized>(
    reader: &R,
    group: &ComponentGroup,
) -> Result<Option<ComponentStatus>, StoreError> {
    Ok(subtree_components(reader, group)?
        .iter()
        .map(|c| c.status)
        .max())
}

/// Whether the group should be displayed folded.
///
/// `Auto` folds the group while none of its direct components (enabled or
/// not) is above operational; subgroups are not consulted.
///
/// # Errors
///
/// Returns any error raised by the reader.
pub fn is_collapsed<R: TreeReader + ?Sized>(
    reader: &R,
    group: &ComponentGroup,
) -> Result<bool, StoreError> {
    match group.collapsed {
        CollapseMode::Expanded => Ok(false),
        CollapseMode::Collapsed => Ok(true),
        CollapseMode::Auto => Ok(!reader
            .direct_components(group.id, false)?
            .iter()
            .any(|c| c.status > ComponentStatus::Operational)),
    }
}
