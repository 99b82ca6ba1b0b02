#![allow(clippy::expect_used)]

use std::sync::Mutex;

use statusboard::application::commands::{
    RemoveComponentGroupCommand, UpdateComponentGroupCommand,
};
use statusboard::application::services::group_mutation::GroupMutationService;
use statusboard::application::services::status_board::StatusBoardService;
use statusboard::domain::entities::component::NewComponent;
use statusboard::domain::entities::component_group::{GroupId, NewComponentGroup, ROOT};
use statusboard::domain::entities::group_event::{GroupEvent, GroupEventKind};
use statusboard::domain::ports::notifier::{NotificationError, Notifier};
use statusboard::domain::ports::store::{StoreError, TreeReader, TreeStore, TreeTransaction};
use statusboard::domain::rollup::group_status;
use statusboard::domain::value_objects::collapse_mode::CollapseMode;
use statusboard::domain::value_objects::component_status::ComponentStatus;
use statusboard::infrastructure::i18n::{Language, StaticTranslator};
use statusboard::infrastructure::notifications::log_file::LogFileNotifier;
use statusboard::infrastructure::persistence::sqlite_store::SqliteStore;

#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<GroupEvent>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: &GroupEvent) -> Result<(), NotificationError> {
        self.events.lock().expect("lock").push(event.clone());
        Ok(())
    }
}

fn open(dir: &tempfile::TempDir) -> SqliteStore {
    let path = dir.path().join("board.db");
    SqliteStore::new(path.to_str().expect("utf-8 path")).expect("open store")
}

fn status(store: &SqliteStore, id: GroupId) -> ComponentStatus {
    let g = store.group(id).expect("read").expect("group exists");
    group_status(store, &g).expect("status")
}

/// A holds c1 (major outage) and subgroup B; B holds c2 (operational).
fn seed(store: &SqliteStore) -> (GroupId, GroupId) {
    let a = store
        .create_group(NewComponentGroup::new("A", ROOT))
        .expect("create A");
    let b = store
        .create_group(NewComponentGroup::new("B", a.id))
        .expect("create B");
    store
        .create_component(NewComponent::new("c1", a.id, ComponentStatus::MajorOutage))
        .expect("create c1");
    store
        .create_component(NewComponent::new("c2", b.id, ComponentStatus::Operational))
        .expect("create c2");
    (a.id, b.id)
}

#[test]
fn rollup_scenario_on_sqlite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open(&dir);
    let (a, b) = seed(&store);

    assert_eq!(status(&store, b), ComponentStatus::Operational);
    assert_eq!(status(&store, a), ComponentStatus::MajorOutage);

    let notifier = RecordingNotifier::default();
    GroupMutationService::new(&store, &notifier)
        .remove_group(&RemoveComponentGroupCommand::new(b))
        .expect("remove B");

    assert_eq!(store.group(b).expect("read"), None);
    assert_eq!(store.direct_components(a, true).expect("components").len(), 2);
    assert_eq!(status(&store, a), ComponentStatus::PartialOutage);

    let events = notifier.events.lock().expect("lock");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, GroupEventKind::Removed);
    assert_eq!(events[0].group.id, b);
    assert_eq!(events[0].group.parent_id, a);
}

#[test]
fn state_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (a, b) = {
        let store = open(&dir);
        let ids = seed(&store);
        let notifier = RecordingNotifier::default();
        GroupMutationService::new(&store, &notifier)
            .update_group(
                &UpdateComponentGroupCommand::new(ids.1)
                    .name("Databases")
                    .order(4)
                    .collapsed(CollapseMode::Auto),
            )
            .expect("update");
        ids
    };

    let store = open(&dir);
    let b_group = store.group(b).expect("read").expect("group");
    assert_eq!(b_group.name, "Databases");
    assert_eq!(b_group.order, 4);
    assert_eq!(b_group.collapsed, CollapseMode::Auto);
    assert_eq!(b_group.parent_id, a);
    assert_eq!(status(&store, a), ComponentStatus::MajorOutage);
}

#[test]
fn cycle_guard_on_sqlite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open(&dir);
    let (a, b) = seed(&store);
    let notifier = RecordingNotifier::default();
    let service = GroupMutationService::new(&store, &notifier);

    let updated = service
        .update_group(&UpdateComponentGroupCommand::new(a).parent_id(b))
        .expect("update");
    assert_eq!(updated.parent_id, ROOT);
    assert_eq!(store.group(a).expect("read").map(|g| g.parent_id), Some(ROOT));

    let updated = service
        .update_group(&UpdateComponentGroupCommand::new(b).parent_id(ROOT))
        .expect("update");
    assert_eq!(updated.parent_id, ROOT);
    let top: Vec<GroupId> = store
        .direct_children(ROOT)
        .expect("children")
        .iter()
        .map(|g| g.id)
        .collect();
    assert_eq!(top, vec![a, b]);
}

#[test]
fn rolled_back_transaction_leaves_database_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open(&dir);
    let (a, b) = seed(&store);

    let result = store.atomically(&mut |tx: &mut dyn TreeTransaction| {
        tx.delete_group(b)?;
        tx.delete_group(12345)
    });
    assert!(matches!(result, Err(StoreError::NotFound(_))));
    assert!(store.group(b).expect("read").is_some());
    assert_eq!(status(&store, a), ComponentStatus::MajorOutage);
}

#[test]
fn malformed_rows_are_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open(&dir);
    let (a, b) = seed(&store);

    // Write a cycle directly, bypassing the mutation service.
    store
        .atomically(&mut |tx: &mut dyn TreeTransaction| {
            let mut group = tx.group(a)?.expect("A exists");
            group.parent_id = b;
            tx.save_group(&group)
        })
        .expect("raw write");

    let g = store.group(a).expect("read").expect("group");
    assert!(matches!(
        group_status(&store, &g),
        Err(StoreError::MalformedTree(_))
    ));
    let notifier = RecordingNotifier::default();
    assert!(matches!(
        GroupMutationService::new(&store, &notifier)
            .update_group(&UpdateComponentGroupCommand::new(a).name("x")),
        Err(StoreError::MalformedTree(_))
    ));
    assert!(notifier.events.lock().expect("lock").is_empty());
}

#[test]
fn board_and_event_log_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open(&dir);
    let (a, b) = seed(&store);
    store
        .create_component(NewComponent::new(
            "status-page",
            ROOT,
            ComponentStatus::PerformanceIssues,
        ))
        .expect("create ungrouped");

    let log_path = dir.path().join("events.log");
    let log = LogFileNotifier::new(log_path.to_str().expect("utf-8 path"));
    GroupMutationService::new(&store, &log)
        .update_group(&UpdateComponentGroupCommand::new(b).collapsed(CollapseMode::Collapsed))
        .expect("update");

    let translator = StaticTranslator::new(Language::Fr);
    let board = StatusBoardService::new(&store, &translator)
        .board()
        .expect("board");
    assert_eq!(board.groups.len(), 1);
    assert_eq!(board.groups[0].id, a);
    assert_eq!(board.groups[0].human_status, "Panne majeure");
    assert!(board.groups[0].subgroups[0].is_collapsed);
    assert_eq!(board.ungrouped.len(), 1);
    assert_eq!(board.ungrouped[0].human_status, "Problèmes de performance");

    let content = std::fs::read_to_string(&log_path).expect("read log");
    let line: serde_json::Value = serde_json::from_str(content.trim()).expect("json line");
    assert_eq!(line["event"], "component_group.updated");
    assert_eq!(line["group"]["id"], b);
    assert_eq!(line["group"]["collapsed"], "collapsed");
}

#[test]
fn set_component_status_changes_rollup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open(&dir);
    let (a, _) = seed(&store);

    let c1 = store.direct_components(a, true).expect("components")[0].clone();
    let updated = store
        .set_component_status(c1.id, ComponentStatus::Operational)
        .expect("set status");
    assert_eq!(updated.status, ComponentStatus::Operational);
    assert_eq!(status(&store, a), ComponentStatus::Operational);

    assert!(matches!(
        store.set_component_status(999, ComponentStatus::MajorOutage),
        Err(StoreError::NotFound(_))
    ));
}
