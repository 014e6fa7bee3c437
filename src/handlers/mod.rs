//! Route handlers. Each takes the request (or the parts it needs) and the
//! shared `AppState`, and returns a `ResultResp`.

pub mod auth;
pub mod listings;
pub mod pages;
pub mod upload;
pub mod users;

use std::collections::HashMap;
use std::io::Read;

use astra::Request;
use serde::de::DeserializeOwned;

use crate::errors::ServerError;

/// Upper bound for JSON request bodies.
pub const MAX_JSON_BYTES: usize = 64 * 1024;

/// Decoded query-string pairs. Later duplicates win.
pub fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Read at most `limit` bytes of body; anything longer is a 413.
pub fn read_body(req: &mut Request, limit: usize) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read body: {e}")))?;
    if buf.len() > limit {
        return Err(ServerError::PayloadTooLarge);
    }
    Ok(buf)
}

pub fn read_json<T: DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    let bytes = read_body(req, MAX_JSON_BYTES)?;
    serde_json::from_slice(&bytes).map_err(|e| ServerError::BadRequest(format!("invalid JSON: {e}")))
}

pub fn content_type(req: &Request) -> Option<&str> {
    req.headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
}

/// Path ids for accounts are integers; anything else cannot name a user.
pub fn parse_user_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse().map_err(|_| ServerError::NotFound)
}

pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
