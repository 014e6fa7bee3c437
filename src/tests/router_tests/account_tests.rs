use crate::tests::utils::{body_json, cookie_from, send, sign_in_new_user, test_state};
use http::Method;
use serde_json::json;

#[test]
fn signup_returns_user_without_password() {
    let state = test_state();
    let resp = send(
        &state,
        Method::POST,
        "/api/auth/signup",
        Some(json!({ "username": "meera", "email": "Meera@Example.com", "password": "longenough" })),
        None,
    );
    assert_eq!(resp.status(), 201);
    let user = body_json(resp);
    assert_eq!(user["email"], "meera@example.com");
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
}

#[test]
fn duplicate_email_conflicts() {
    let state = test_state();
    sign_in_new_user(&state, "meera");
    let resp = send(
        &state,
        Method::POST,
        "/api/auth/signup",
        Some(json!({ "username": "other", "email": "meera@example.com", "password": "longenough" })),
        None,
    );
    assert_eq!(resp.status(), 409);
}

#[test]
fn short_password_is_rejected() {
    let state = test_state();
    let resp = send(
        &state,
        Method::POST,
        "/api/auth/signup",
        Some(json!({ "username": "meera", "email": "m@example.com", "password": "short" })),
        None,
    );
    assert_eq!(resp.status(), 400);
}

#[test]
fn wrong_password_is_unauthorized() {
    let state = test_state();
    sign_in_new_user(&state, "meera");
    let resp = send(
        &state,
        Method::POST,
        "/api/auth/signin",
        Some(json!({ "email": "meera@example.com", "password": "not-the-password" })),
        None,
    );
    assert_eq!(resp.status(), 401);
    assert!(resp.headers().get("Set-Cookie").is_none());
}

#[test]
fn signout_revokes_the_session() {
    let state = test_state();
    let (id, cookie) = sign_in_new_user(&state, "meera");

    let resp = send(&state, Method::GET, "/api/auth/signout", None, Some(&cookie));
    assert_eq!(resp.status(), 200);
    assert_eq!(cookie_from(&resp), "session=");

    let resp = send(&state, Method::GET, &format!("/api/user/listings/{id}"), None, Some(&cookie));
    assert_eq!(resp.status(), 401);
}

#[test]
fn profile_update_is_self_only() {
    let state = test_state();
    let (me, cookie) = sign_in_new_user(&state, "meera");
    let (other, _) = sign_in_new_user(&state, "ravi");

    let resp = send(
        &state,
        Method::POST,
        &format!("/api/user/update/{other}"),
        Some(json!({ "username": "hijacked" })),
        Some(&cookie),
    );
    assert_eq!(resp.status(), 403);

    let resp = send(
        &state,
        Method::POST,
        &format!("/api/user/update/{me}"),
        Some(json!({ "username": "meera_k", "avatar": "https://cdn.test/me.png" })),
        Some(&cookie),
    );
    assert_eq!(resp.status(), 200);
    let user = body_json(resp);
    assert_eq!(user["username"], "meera_k");
    assert_eq!(user["avatar"], "https://cdn.test/me.png");
    assert_eq!(user["email"], "meera@example.com");
}

#[test]
fn deleting_account_ends_session() {
    let state = test_state();
    let (me, cookie) = sign_in_new_user(&state, "meera");

    let resp = send(&state, Method::DELETE, &format!("/api/user/delete/{me}"), None, Some(&cookie));
    assert_eq!(resp.status(), 200);

    let resp = send(&state, Method::GET, &format!("/api/user/listings/{me}"), None, Some(&cookie));
    assert_eq!(resp.status(), 401);
}

#[test]
fn avatar_must_be_a_web_url() {
    let state = test_state();
    let (me, cookie) = sign_in_new_user(&state, "meera");
    let resp = send(
        &state,
        Method::POST,
        &format!("/api/user/update/{me}"),
        Some(json!({ "avatar": "javascript:alert(1)" })),
        Some(&cookie),
    );
    assert_eq!(resp.status(), 400);
}
