use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::cell::RefCell;

use crate::errors::ServerError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Thread-local connection slot, remembered together with the file it points at.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = const { RefCell::new(None) };
}

#[derive(Clone, Debug)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let stale = !matches!(slot.as_ref(), Some((p, _)) if *p == self.path);
                if stale {
                    let conn = open(&self.path)?;
                    *slot = Some((self.path.clone(), conn));
                }
                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(ServerError::InternalError),
                }
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

fn open(path: &str) -> Result<Connection, ServerError> {
    let conn = Connection::open(path)
        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    // Per-connection pragma; the schema file sets it only for the bootstrap connection.
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| ServerError::DbError(format!("Enable foreign keys failed: {e}")))?;
    register_functions(&conn)?;
    Ok(conn)
}

/// SQL helpers every connection needs. `fold_case(x)` is Unicode
/// lowercase; SQLite's own `lower()` and `LIKE` only fold ASCII.
pub fn register_functions(conn: &Connection) -> Result<(), ServerError> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
    )
    .map_err(|e| ServerError::DbError(format!("Register fold_case failed: {e}")))
}

/// Apply the embedded schema. Idempotent.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| apply_schema(conn))?;
    log::info!("database ready at {}", db.path());
    Ok(())
}

pub fn apply_schema(conn: &Connection) -> Result<(), ServerError> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))
}
