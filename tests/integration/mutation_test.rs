#![allow(clippy::expect_used)]

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use statusboard::application::commands::{
    RemoveComponentGroupCommand, UpdateComponentGroupCommand,
};
use statusboard::application::services::group_mutation::GroupMutationService;
use statusboard::domain::entities::component::{Component, ComponentId, NewComponent};
use statusboard::domain::entities::component_group::{ComponentGroup, GroupId, NewComponentGroup, ROOT};
use statusboard::domain::entities::group_event::{GroupEvent, GroupEventKind};
use statusboard::domain::entities::group_tree::GroupTree;
use statusboard::domain::ports::notifier::{NotificationError, Notifier};
use statusboard::domain::ports::store::{StoreError, TreeReader, TreeStore, TreeTransaction};
use statusboard::domain::rollup::{descendant_group_ids, group_status};
use statusboard::domain::value_objects::collapse_mode::CollapseMode;
use statusboard::domain::value_objects::component_status::ComponentStatus;
use statusboard::infrastructure::notifications::composite::CompositeNotifier;
use statusboard::infrastructure::persistence::in_memory_store::InMemoryStore;

fn group(id: GroupId, parent_id: GroupId) -> ComponentGroup {
    NewComponentGroup::new(format!("g{id}"), parent_id).into_group(id)
}

fn component(id: ComponentId, group_id: GroupId) -> Component {
    NewComponent::new(format!("c{id}"), group_id, ComponentStatus::Operational).into_component(id)
}

fn parent_of(store: &dyn TreeStore, id: GroupId) -> GroupId {
    store.group(id).expect("read").expect("group exists").parent_id
}

/// ```text
/// 1 ─┬─ 2 ─┬─ 4 ── 6
///    │     └─ 5
///    └─ 3
/// 7
/// ```
/// Components: 10, 11 in 2 (11 disabled); 12 in 4; 13 in 1; 14 ungrouped.
fn forest() -> InMemoryStore {
    let mut disabled = component(11, 2);
    disabled.enabled = false;
    InMemoryStore::from_tree(GroupTree::from_parts(
        [
            group(1, ROOT),
            group(2, 1),
            group(3, 1),
            group(4, 2),
            group(5, 2),
            group(6, 4),
            group(7, ROOT),
        ],
        [
            component(10, 2),
            disabled,
            component(12, 4),
            component(13, 1),
            component(14, ROOT),
        ],
    ))
}

/// Captures, for each event, the children the store reports for the event's
/// parent at delivery time.
struct ReReadingNotifier {
    store: Arc<InMemoryStore>,
    seen: Mutex<Vec<(GroupEventKind, Option<ComponentGroup>, Vec<GroupId>)>>,
}

impl Notifier for ReReadingNotifier {
    fn notify(&self, event: &GroupEvent) -> Result<(), NotificationError> {
        let still_there = self
            .store
            .group(event.group.id)
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;
        let siblings = self
            .store
            .direct_children(event.group.parent_id)
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?
            .iter()
            .map(|g| g.id)
            .collect();
        self.seen
            .lock()
            .expect("lock")
            .push((event.kind, still_there, siblings));
        Ok(())
    }
}

#[test]
fn remove_flattens_exactly_one_level() {
    let store = forest();
    let notifier = CompositeNotifier::default();
    let service = GroupMutationService::new(&store, &notifier);

    let removed = service
        .remove_group(&RemoveComponentGroupCommand::new(2))
        .expect("remove");
    assert_eq!(removed.parent_id, 1);

    assert_eq!(store.group(2).expect("read"), None);
    // direct components, enabled or not, move up
    let members: Vec<ComponentId> = store
        .direct_components(1, false)
        .expect("components")
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(members, vec![10, 11, 13]);
    // direct subgroups move up
    assert_eq!(parent_of(&store, 4), 1);
    assert_eq!(parent_of(&store, 5), 1);
    // grandchildren keep their parent
    assert_eq!(parent_of(&store, 6), 4);
    assert_eq!(
        store.direct_components(4, true).expect("components")[0].id,
        12
    );
    // unrelated nodes untouched
    assert_eq!(parent_of(&store, 3), 1);
    assert_eq!(parent_of(&store, 7), ROOT);
}

#[test]
fn removing_top_level_group_moves_contents_to_root() {
    let store = forest();
    let notifier = CompositeNotifier::default();
    let service = GroupMutationService::new(&store, &notifier);

    service
        .remove_group(&RemoveComponentGroupCommand::new(1))
        .expect("remove");

    let top: BTreeSet<GroupId> = store
        .direct_children(ROOT)
        .expect("children")
        .iter()
        .map(|g| g.id)
        .collect();
    assert_eq!(top, BTreeSet::from([2, 3, 7]));
    let ungrouped: Vec<ComponentId> = store
        .direct_components(ROOT, false)
        .expect("components")
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ungrouped, vec![13, 14]);
}

#[test]
fn reparenting_under_self_or_descendant_is_ignored() {
    let store = forest();
    let notifier = CompositeNotifier::default();
    let service = GroupMutationService::new(&store, &notifier);

    let mut forbidden = descendant_group_ids(&store, 2).expect("descendants");
    forbidden.insert(2);
    assert_eq!(forbidden, BTreeSet::from([2, 4, 5, 6]));

    for target in forbidden {
        let updated = service
            .update_group(&UpdateComponentGroupCommand::new(2).parent_id(target).order(target))
            .expect("update");
        assert_eq!(updated.parent_id, 1, "parent {target} must be ignored");
        // other fields still applied
        assert_eq!(updated.order, target);
        assert_eq!(parent_of(&store, 2), 1);
    }
}

#[test]
fn reparenting_to_valid_target_is_applied() {
    let store = forest();
    let notifier = CompositeNotifier::default();
    let service = GroupMutationService::new(&store, &notifier);

    for target in [3, 7, ROOT, 1] {
        service
            .update_group(&UpdateComponentGroupCommand::new(2).parent_id(target))
            .expect("update");
        assert_eq!(parent_of(&store, 2), target);
    }
    // subtree travels with the group
    assert_eq!(parent_of(&store, 4), 2);
    assert_eq!(parent_of(&store, 6), 4);
}

#[test]
fn reparenting_to_unknown_group_is_ignored() {
    let store = forest();
    let notifier = CompositeNotifier::default();
    let service = GroupMutationService::new(&store, &notifier);

    let updated = service
        .update_group(&UpdateComponentGroupCommand::new(3).parent_id(404).name("Cache"))
        .expect("update");
    assert_eq!(updated.parent_id, 1);
    assert_eq!(updated.name, "Cache");
}

#[test]
fn partial_update_leaves_absent_fields() {
    let store = forest();
    let notifier = CompositeNotifier::default();
    let service = GroupMutationService::new(&store, &notifier);

    let before = store.group(5).expect("read").expect("group");
    let updated = service
        .update_group(&UpdateComponentGroupCommand::new(5).collapsed(CollapseMode::Collapsed))
        .expect("update");

    assert_eq!(updated.collapsed, CollapseMode::Collapsed);
    assert_eq!(updated.name, before.name);
    assert_eq!(updated.order, before.order);
    assert_eq!(updated.parent_id, before.parent_id);
}

#[test]
fn unknown_group_is_not_found() {
    let store = forest();
    let notifier = CompositeNotifier::default();
    let service = GroupMutationService::new(&store, &notifier);

    assert_eq!(
        service.update_group(&UpdateComponentGroupCommand::new(99).order(1)),
        Err(StoreError::NotFound("group 99".into()))
    );
    assert_eq!(
        service.remove_group(&RemoveComponentGroupCommand::new(99)),
        Err(StoreError::NotFound("group 99".into()))
    );
}

#[test]
fn listeners_observe_committed_state() {
    let store = Arc::new(forest());
    let notifier = ReReadingNotifier {
        store: Arc::clone(&store),
        seen: Mutex::new(Vec::new()),
    };
    let service = GroupMutationService::new(store.as_ref(), &notifier);

    service
        .update_group(&UpdateComponentGroupCommand::new(3).parent_id(7))
        .expect("update");
    service
        .remove_group(&RemoveComponentGroupCommand::new(2))
        .expect("remove");

    let seen = notifier.seen.lock().expect("lock");
    assert_eq!(seen.len(), 2);

    let (kind, still_there, siblings) = &seen[0];
    assert_eq!(*kind, GroupEventKind::Updated);
    assert_eq!(still_there.as_ref().map(|g| g.parent_id), Some(7));
    assert_eq!(siblings, &vec![3]);

    let (kind, still_there, siblings) = &seen[1];
    assert_eq!(*kind, GroupEventKind::Removed);
    assert!(still_there.is_none(), "group is gone when listeners run");
    assert_eq!(siblings, &vec![4, 5]);
}

#[test]
fn failed_transaction_writes_nothing() {
    let store = forest();
    let before = store.snapshot().expect("snapshot");

    let result = store.atomically(&mut |tx: &mut dyn TreeTransaction| {
        tx.assign_component(10, ROOT)?;
        tx.delete_group(999)
    });

    assert!(matches!(result, Err(StoreError::NotFound(_))));
    let after = store.snapshot().expect("snapshot");
    assert_eq!(
        after.get_component(10).map(|c| c.group_id),
        before.get_component(10).map(|c| c.group_id)
    );
}

#[test]
fn update_on_malformed_tree_fails_without_writing() {
    let store = InMemoryStore::from_tree(GroupTree::from_parts(
        [group(1, 3), group(2, 1), group(3, 2)],
        [],
    ));
    let notifier = CompositeNotifier::default();
    let service = GroupMutationService::new(&store, &notifier);

    assert!(matches!(
        service.update_group(&UpdateComponentGroupCommand::new(2).name("x")),
        Err(StoreError::MalformedTree(_))
    ));
    assert_eq!(store.group(2).expect("read").map(|g| g.name), Some("g2".into()));
}

#[test]
fn concurrent_opposite_reparentings_never_form_a_cycle() {
    for _ in 0..50 {
        let store = InMemoryStore::from_tree(GroupTree::from_parts(
            [group(1, ROOT), group(2, ROOT)],
            [component(1, 1), component(2, 2)],
        ));
        let notifier = CompositeNotifier::default();
        let service = GroupMutationService::new(&store, &notifier);

        std::thread::scope(|s| {
            s.spawn(|| {
                service
                    .update_group(&UpdateComponentGroupCommand::new(1).parent_id(2))
                    .expect("update 1");
            });
            s.spawn(|| {
                service
                    .update_group(&UpdateComponentGroupCommand::new(2).parent_id(1))
                    .expect("update 2");
            });
        });

        let p1 = parent_of(&store, 1);
        let p2 = parent_of(&store, 2);
        assert!(
            (p1 == 2 && p2 == ROOT) || (p1 == ROOT && p2 == 1),
            "exactly one reparenting wins, got 1→{p1}, 2→{p2}"
        );
        let descendants = descendant_group_ids(&store, ROOT).expect("acyclic");
        assert_eq!(descendants, BTreeSet::from([1, 2]));
        for id in [1, 2] {
            let g = store.group(id).expect("read").expect("group");
            assert!(group_status(&store, &g).is_ok());
        }
    }
}
