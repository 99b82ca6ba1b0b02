use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::domain::entities::component::{Component, ComponentId, NewComponent};
use crate::domain::entities::component_group::{ComponentGroup, GroupId, NewComponentGroup, ROOT};
use crate::domain::entities::group_tree::GroupTree;
use crate::domain::ports::store::{
    StoreError, TransactionOp, TreeReader, TreeStore, TreeTransaction,
};
use crate::domain::value_objects::collapse_mode::CollapseMode;
use crate::domain::value_objects::component_status::ComponentStatus;

use super::migrations;

const GROUP_COLUMNS: &str = "id, name, sort_order, parent_id, collapsed";
const COMPONENT_COLUMNS: &str = "id, name, group_id, status, enabled, sort_order";

/// SQLite-backed persistent store for groups and components.
///
/// One connection behind a mutex: mutations run in `IMMEDIATE` transactions,
/// so writers are serialized both inside the process and across processes
/// sharing the file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new `SQLite` store at the given path.
    ///
    /// Expands `~`, creates parent directories, opens connection,
    /// sets WAL mode and pragmas, and initializes schema.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the database cannot be opened or initialized.
    pub fn new(path: &str) -> Result<Self, StoreError> {
        let expanded = shellexpand::tilde(path);
        let db_path = PathBuf::from(expanded.as_ref());

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }

        let conn = Connection::open(&db_path).map_err(write_failed)?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(write_failed)?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(write_failed)?;
        conn.pragma_update(None, "busy_timeout", 5000)
            .map_err(write_failed)?;

        Self::with_connection(conn)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the schema cannot be created.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory().map_err(write_failed)?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        migrations::initialize_schema(&conn).map_err(write_failed)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))
    }
}

fn read_failed(e: rusqlite::Error) -> StoreError {
    StoreError::ReadFailed(e.to_string())
}

fn write_failed(e: rusqlite::Error) -> StoreError {
    StoreError::WriteFailed(e.to_string())
}

fn parse_group_row(row: &rusqlite::Row<'_>) -> Result<ComponentGroup, rusqlite::Error> {
    let collapsed: String = row.get(4)?;
    let collapsed = collapsed
        .parse::<CollapseMode>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, e.into()))?;

    Ok(ComponentGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        order: row.get(2)?,
        parent_id: row.get(3)?,
        collapsed,
    })
}

fn parse_component_row(row: &rusqlite::Row<'_>) -> Result<Component, rusqlite::Error> {
    let level: u8 = row.get(3)?;
    let status = ComponentStatus::try_from(level)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, e.into()))?;

    Ok(Component {
        id: row.get(0)?,
        name: row.get(1)?,
        group_id: row.get(2)?,
        status,
        enabled: row.get(4)?,
        order: row.get(5)?,
    })
}

fn fetch_group(conn: &Connection, id: GroupId) -> Result<Option<ComponentGroup>, StoreError> {
    conn.query_row(
        &format!("SELECT {GROUP_COLUMNS} FROM component_groups WHERE id = ?1"),
        params![id],
        parse_group_row,
    )
    .optional()
    .map_err(read_failed)
}

fn fetch_children(conn: &Connection, parent_id: GroupId) -> Result<Vec<ComponentGroup>, StoreError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {GROUP_COLUMNS} FROM component_groups \
             WHERE parent_id = ?1 ORDER BY sort_order, id"
        ))
        .map_err(read_failed)?;

    let groups = stmt
        .query_map(params![parent_id], parse_group_row)
        .map_err(read_failed)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_failed)?;
    Ok(groups)
}

fn fetch_components(
    conn: &Connection,
    group_id: GroupId,
    enabled_only: bool,
) -> Result<Vec<Component>, StoreError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COMPONENT_COLUMNS} FROM components \
             WHERE group_id = ?1 AND (?2 = 0 OR enabled = 1) ORDER BY sort_order, id"
        ))
        .map_err(read_failed)?;

    let components = stmt
        .query_map(params![group_id, enabled_only], parse_component_row)
        .map_err(read_failed)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_failed)?;
    Ok(components)
}

fn fetch_component(conn: &Connection, id: ComponentId) -> Result<Option<Component>, StoreError> {
    conn.query_row(
        &format!("SELECT {COMPONENT_COLUMNS} FROM components WHERE id = ?1"),
        params![id],
        parse_component_row,
    )
    .optional()
    .map_err(read_failed)
}

fn load_tree(conn: &Connection) -> Result<GroupTree, StoreError> {
    let mut stmt = conn
        .prepare(&format!("SELECT {GROUP_COLUMNS} FROM component_groups"))
        .map_err(read_failed)?;
    let groups = stmt
        .query_map([], parse_group_row)
        .map_err(read_failed)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_failed)?;

    let mut stmt = conn
        .prepare(&format!("SELECT {COMPONENT_COLUMNS} FROM components"))
        .map_err(read_failed)?;
    let components = stmt
        .query_map([], parse_component_row)
        .map_err(read_failed)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_failed)?;

    Ok(GroupTree::from_parts(groups, components))
}

fn ensure_group_exists(conn: &Connection, id: GroupId) -> Result<(), StoreError> {
    if id != ROOT && fetch_group(conn, id)?.is_none() {
        return Err(StoreError::NotFound(format!("group {id}")));
    }
    Ok(())
}

impl TreeReader for SqliteStore {
    fn group(&self, id: GroupId) -> Result<Option<ComponentGroup>, StoreError> {
        let conn = self.lock()?;
        fetch_group(&conn, id)
    }

    fn direct_children(&self, parent_id: GroupId) -> Result<Vec<ComponentGroup>, StoreError> {
        let conn = self.lock()?;
        fetch_children(&conn, parent_id)
    }

    fn direct_components(
        &self,
        group_id: GroupId,
        enabled_only: bool,
    ) -> Result<Vec<Component>, StoreError> {
        let conn = self.lock()?;
        fetch_components(&conn, group_id, enabled_only)
    }
}

/// Writes performed inside an open `SQLite` transaction.
struct SqliteTransaction<'a> {
    conn: &'a Connection,
}

impl TreeReader for SqliteTransaction<'_> {
    fn group(&self, id: GroupId) -> Result<Option<ComponentGroup>, StoreError> {
        fetch_group(self.conn, id)
    }

    fn direct_children(&self, parent_id: GroupId) -> Result<Vec<ComponentGroup>, StoreError> {
        fetch_children(self.conn, parent_id)
    }

    fn direct_components(
        &self,
        group_id: GroupId,
        enabled_only: bool,
    ) -> Result<Vec<Component>, StoreError> {
        fetch_components(self.conn, group_id, enabled_only)
    }
}

impl TreeTransaction for SqliteTransaction<'_> {
    fn save_group(&mut self, group: &ComponentGroup) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE component_groups \
                 SET name = ?2, sort_order = ?3, parent_id = ?4, collapsed = ?5 \
                 WHERE id = ?1",
                params![
                    group.id,
                    group.name,
                    group.order,
                    group.parent_id,
                    group.collapsed.as_str(),
                ],
            )
            .map_err(write_failed)?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("group {}", group.id)));
        }
        Ok(())
    }

    fn assign_component(
        &mut self,
        component_id: ComponentId,
        group_id: GroupId,
    ) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE components SET group_id = ?2 WHERE id = ?1",
                params![component_id, group_id],
            )
            .map_err(write_failed)?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("component {component_id}")));
        }
        Ok(())
    }

    fn delete_group(&mut self, id: GroupId) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM component_groups WHERE id = ?1", params![id])
            .map_err(write_failed)?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("group {id}")));
        }
        Ok(())
    }
}

impl TreeStore for SqliteStore {
    fn snapshot(&self) -> Result<GroupTree, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(read_failed)?;
        let tree = load_tree(&tx)?;
        tx.commit().map_err(read_failed)?;
        drop(conn);
        Ok(tree)
    }

    fn atomically(&self, op: &mut TransactionOp<'_>) -> Result<(), StoreError> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(write_failed)?;
        op(&mut SqliteTransaction { conn: &tx })?;
        tx.commit().map_err(write_failed)?;
        drop(conn);
        Ok(())
    }

    fn create_group(&self, group: NewComponentGroup) -> Result<ComponentGroup, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(write_failed)?;
        ensure_group_exists(&tx, group.parent_id)?;
        tx.execute(
            "INSERT INTO component_groups (name, sort_order, parent_id, collapsed) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                group.name,
                group.order,
                group.parent_id,
                group.collapsed.as_str()
            ],
        )
        .map_err(write_failed)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(write_failed)?;
        drop(conn);
        Ok(group.into_group(id))
    }

    fn create_component(&self, component: NewComponent) -> Result<Component, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(write_failed)?;
        ensure_group_exists(&tx, component.group_id)?;
        tx.execute(
            "INSERT INTO components (name, group_id, status, enabled, sort_order) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                component.name,
                component.group_id,
                component.status.level(),
                component.enabled,
                component.order
            ],
        )
        .map_err(write_failed)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(write_failed)?;
        drop(conn);
        Ok(component.into_component(id))
    }

    fn set_component_status(
        &self,
        id: ComponentId,
        status: ComponentStatus,
    ) -> Result<Component, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE components SET status = ?2 WHERE id = ?1",
            params![id, status.level()],
        )
        .map_err(write_failed)?;
        let component = fetch_component(&conn, id)?;
        drop(conn);
        component.ok_or_else(|| StoreError::NotFound(format!("component {id}")))
    }
}
