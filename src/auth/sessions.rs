// src/auth/sessions.rs
use astra::Request;
use rusqlite::{params, Connection, OptionalExtension};

use crate::auth::token::{generate_session_token, hash_token};
use crate::db::connection::Database;
use crate::errors::ServerError;

pub const SESSION_COOKIE: &str = "session";

/// Insert a session row and return the raw token for the cookie.
pub fn create_session(
    conn: &Connection,
    user_id: i64,
    now: i64,
    ttl_secs: i64,
) -> Result<String, ServerError> {
    let raw_token = generate_session_token();
    let hash = hash_token(&raw_token);

    conn.execute(
        r#"
        insert into sessions (user_id, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![user_id, hash.as_slice(), now, now + ttl_secs],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

/// User id behind a live (unexpired, unrevoked) session token.
pub fn load_user_id(conn: &Connection, raw_token: &str, now: i64) -> Result<Option<i64>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select s.user_id
        from sessions s
        where s.token_hash = ?
          and s.expires_at > ?
          and s.revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    let hash = hash_token(raw_token);
    conn.execute(
        "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, hash.as_slice()],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}

/// Pull the `session` value out of the Cookie header(s).
pub fn session_token(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the signed-in user or fail with 401.
pub fn require_user(req: &Request, db: &Database, now: i64) -> Result<i64, ServerError> {
    let token = session_token(req)
        .ok_or_else(|| ServerError::Unauthorized("sign in required".into()))?;
    db.with_conn(|conn| load_user_id(conn, &token, now))?
        .ok_or_else(|| ServerError::Unauthorized("session expired or invalid".into()))
}

pub fn session_cookie(token: &str, ttl_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_secs}")
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
