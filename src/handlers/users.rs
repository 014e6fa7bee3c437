use astra::Request;
use serde_json::json;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::auth::sessions::{expired_session_cookie, require_user};
use crate::db::{listings, users};
use crate::domain::user::{normalize_email, normalize_username, ProfileUpdate};
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{now_secs, parse_user_id, read_json};
use crate::responses::{json_response, json_response_with_cookie};
use crate::state::AppState;

/// Accounts can only be read or changed by their owner.
fn require_self(req: &Request, state: &AppState, raw_id: &str, action: &str) -> Result<i64, ServerError> {
    let user_id = require_user(req, &state.db, now_secs())?;
    if parse_user_id(raw_id)? != user_id {
        return Err(ServerError::Forbidden(format!("you can only {action} your own account")));
    }
    Ok(user_id)
}

/// `GET /api/user/listings/{id}`
pub fn listings(req: &Request, state: &AppState, raw_id: &str) -> ResultResp {
    let user_id = require_self(req, state, raw_id, "view listings of")?;
    let owned = state
        .db
        .with_conn(|conn| listings::listings_by_owner(conn, user_id))?;
    json_response(200, &owned)
}

pub fn update(mut req: Request, state: &AppState, raw_id: &str) -> ResultResp {
    let user_id = require_self(&req, state, raw_id, "update")?;
    let patch: ProfileUpdate = read_json(&mut req)?;

    let username = patch
        .username
        .as_deref()
        .map(normalize_username)
        .transpose()
        .map_err(ServerError::Validation)?;
    let email = patch
        .email
        .as_deref()
        .map(normalize_email)
        .transpose()
        .map_err(ServerError::Validation)?;
    let password_hash = match patch.password.as_deref() {
        Some(pw) => {
            validate_password_strength(pw)?;
            Some(hash_password(pw)?)
        }
        None => None,
    };
    let avatar = patch.avatar.as_deref().map(str::trim);
    if let Some(a) = avatar {
        let ok = url::Url::parse(a).is_ok_and(|u| matches!(u.scheme(), "http" | "https"));
        if !ok {
            return Err(ServerError::Validation("avatar must be an http(s) URL".into()));
        }
    }

    let user = state
        .db
        .with_conn(|conn| {
            users::update_user(
                conn,
                user_id,
                username.as_deref(),
                email.as_deref(),
                password_hash.as_deref(),
                avatar,
            )
        })?
        .ok_or(ServerError::NotFound)?;
    json_response(200, &user)
}

pub fn delete(req: &Request, state: &AppState, raw_id: &str) -> ResultResp {
    let user_id = require_self(req, state, raw_id, "delete")?;
    if !state.db.with_conn(|conn| users::delete_user(conn, user_id))? {
        return Err(ServerError::NotFound);
    }
    log::info!("deleted user {user_id}");
    json_response_with_cookie(
        200,
        &json!({ "success": true, "message": "User has been deleted" }),
        &expired_session_cookie(),
    )
}
