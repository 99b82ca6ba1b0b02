use rusqlite::Connection;

/// Initialize the database schema, creating tables if they don't exist.
///
/// # Errors
/// Returns `rusqlite::Error` if any SQL statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS component_groups (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT    NOT NULL,
            sort_order  INTEGER NOT NULL DEFAULT 0,
            parent_id   INTEGER NOT NULL DEFAULT 0,
            collapsed   TEXT    NOT NULL DEFAULT 'expanded'
        );

        CREATE TABLE IF NOT EXISTS components (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT    NOT NULL,
            group_id    INTEGER NOT NULL DEFAULT 0,
            status      INTEGER NOT NULL DEFAULT 1,
            enabled     INTEGER NOT NULL DEFAULT 1,
            sort_order  INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_component_groups_parent ON component_groups(parent_id);
        CREATE INDEX IF NOT EXISTS idx_components_group ON components(group_id);",
    )?;
    Ok(())
}
