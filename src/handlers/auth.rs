use astra::Request;
use serde_json::json;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::sessions::{
    create_session, expired_session_cookie, revoke_session, session_cookie, session_token,
};
use crate::db::users;
use crate::domain::user::{normalize_email, normalize_username, SignIn, SignUp};
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{now_secs, read_json};
use crate::responses::{json_response, json_response_with_cookie};
use crate::state::AppState;

pub fn signup(mut req: Request, state: &AppState) -> ResultResp {
    let form: SignUp = read_json(&mut req)?;
    let username = normalize_username(&form.username).map_err(ServerError::Validation)?;
    let email = normalize_email(&form.email).map_err(ServerError::Validation)?;
    validate_password_strength(&form.password)?;
    let password_hash = hash_password(&form.password)?;

    let user = state.db.with_conn(|conn| {
        let id = users::insert_user(conn, &username, &email, &password_hash, now_secs())?;
        users::get_user(conn, id)?.ok_or(ServerError::InternalError)
    })?;
    log::info!("new account {} ({})", user.id, user.username);

    // Mail is best effort; the account exists either way.
    if let Some(mailer) = &state.mailer {
        let explore = format!("{}/search", state.config.public_base_url.trim_end_matches('/'));
        if let Err(e) = mailer.send_welcome(&user.email, &user.username, &explore) {
            log::warn!("welcome email to user {} failed: {e}", user.id);
        }
    }

    json_response(201, &user)
}

pub fn signin(mut req: Request, state: &AppState) -> ResultResp {
    let form: SignIn = read_json(&mut req)?;
    let wrong = || ServerError::Unauthorized("wrong credentials".into());
    let email = normalize_email(&form.email).map_err(|_| wrong())?;

    let (user, hash) = state
        .db
        .with_conn(|conn| users::find_credentials(conn, &email))?
        .ok_or_else(wrong)?;
    if !verify_password(&form.password, &hash)? {
        return Err(wrong());
    }

    let now = now_secs();
    let ttl = state.config.session_ttl_secs;
    let token = state.db.with_conn(|conn| {
        let token = create_session(conn, user.id, now, ttl)?;
        users::touch_last_login(conn, user.id, now)?;
        Ok(token)
    })?;

    json_response_with_cookie(200, &user, &session_cookie(&token, ttl))
}

pub fn signout(req: &Request, state: &AppState) -> ResultResp {
    if let Some(token) = session_token(req) {
        state
            .db
            .with_conn(|conn| revoke_session(conn, &token, now_secs()))?;
    }
    json_response_with_cookie(
        200,
        &json!({ "success": true, "message": "User has been logged out" }),
        &expired_session_cookie(),
    )
}
