use std::collections::{BTreeSet, VecDeque};

use crate::domain::entities::component_group::GroupId;
use crate::domain::ports::store::{StoreError, TreeReader};

/// Every group reachable below `group_id`, excluding `group_id` itself.
///
/// Breadth-first over `direct_children`. In a forest each group is reached
/// at most once, so meeting a group twice (or meeting `group_id` again)
/// means the stored parent pointers contain a cycle.
///
/// # Errors
///
/// Returns `StoreError::MalformedTree` on a cycle, or any error raised by
/// the reader.
pub fn descendant_group_ids<R: TreeReader + ?Sized>(
    reader: &R,
    group_id: GroupId,
) -> Result<BTreeSet<GroupId>, StoreError> {
    let mut found = BTreeSet::new();
    let mut queue = VecDeque::from([group_id]);

    while let Some(current) = queue.pop_front() {
        for child in reader.direct_children(current)? {
            if child.id == group_id || !found.insert(child.id) {
                tracing::error!(group_id, child = child.id, "cycle in group hierarchy");
                return Err(StoreError::MalformedTree(child.id));
            }
            queue.push_back(child.id);
        }
    }

    Ok(found)
}
