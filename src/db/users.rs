// src/db/users.rs
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::user::User;
use crate::errors::ServerError;

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let created_at: i64 = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        avatar: row.get(3)?,
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
    })
}

/// Map a UNIQUE violation on users to a 409 the caller can show.
fn unique_err(e: rusqlite::Error, what: &str) -> ServerError {
    match e {
        rusqlite::Error::SqliteFailure(ref err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            ServerError::Conflict("username or email is already taken".into())
        }
        other => ServerError::DbError(format!("{what} failed: {other}")),
    }
}

/// Insert a user; username and email must already be normalized.
pub fn insert_user(
    conn: &Connection,
    username: &str,
    email: &str,
    password_hash: &str,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        "insert into users (username, email, password_hash, created_at) values (?, ?, ?, ?)",
        params![username, email, password_hash, now],
    )
    .map_err(|e| unique_err(e, "insert user"))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_user(conn: &Connection, user_id: i64) -> Result<Option<User>, ServerError> {
    conn.query_row(
        "select id, username, email, avatar, created_at from users where id = ?",
        params![user_id],
        user_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

/// Returns the user and their stored password hash.
pub fn find_credentials(
    conn: &Connection,
    email: &str,
) -> Result<Option<(User, String)>, ServerError> {
    conn.query_row(
        "select id, username, email, avatar, created_at, password_hash from users where email = ?",
        params![email],
        |row| Ok((user_from_row(row)?, row.get::<_, String>(5)?)),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select credentials failed: {e}")))
}

pub fn touch_last_login(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update users set last_login_at = ? where id = ?",
        params![now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last_login_at failed: {e}")))?;
    Ok(())
}

/// Fields set to `None` keep their stored value.
pub fn update_user(
    conn: &Connection,
    user_id: i64,
    username: Option<&str>,
    email: Option<&str>,
    password_hash: Option<&str>,
    avatar: Option<&str>,
) -> Result<Option<User>, ServerError> {
    conn.execute(
        r#"
        update users set
            username = coalesce(?1, username),
            email = coalesce(?2, email),
            password_hash = coalesce(?3, password_hash),
            avatar = coalesce(?4, avatar)
        where id = ?5
        "#,
        params![username, email, password_hash, avatar, user_id],
    )
    .map_err(|e| unique_err(e, "update user"))?;
    get_user(conn, user_id)
}

/// Deletes the user; sessions and listings go with it (FK cascade).
pub fn delete_user(conn: &Connection, user_id: i64) -> Result<bool, ServerError> {
    let n = conn
        .execute("delete from users where id = ?", params![user_id])
        .map_err(|e| ServerError::DbError(format!("delete user failed: {e}")))?;
    Ok(n > 0)
}
