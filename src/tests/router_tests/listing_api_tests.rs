use crate::domain::listing::tests::sample;
use crate::tests::utils::{body_json, get, send, sign_in_new_user, test_state};
use http::Method;
use serde_json::{json, Value};

fn payload() -> Value {
    json!({
        "name": "Sunny two bedroom flat",
        "description": "Close to the old city walls",
        "address": "12 MI Road",
        "city": "Jaipur",
        "type": "rent",
        "bedrooms": 2,
        "bathrooms": 1,
        "regularPrice": 15000,
        "discountPrice": 0,
        "offer": false,
        "parking": true,
        "furnished": false,
        "imageUrls": ["https://cdn.example.com/a.jpg"]
    })
}

#[test]
fn create_requires_a_session() {
    let state = test_state();
    let resp = send(&state, Method::POST, "/api/listing/create", Some(payload()), None);
    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp)["success"], false);
}

#[test]
fn owner_can_create_update_and_delete() {
    let state = test_state();
    let (user_id, cookie) = sign_in_new_user(&state, "owner");

    let resp = send(&state, Method::POST, "/api/listing/create", Some(payload()), Some(&cookie));
    assert_eq!(resp.status(), 201);
    let created = body_json(resp);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["ownerRef"], user_id);
    assert_eq!(created["type"], "rent");

    let fetched = body_json(get(&state, &format!("/api/listing/get/{id}")));
    assert_eq!(fetched["name"], "Sunny two bedroom flat");

    let mut changed = payload();
    changed["regularPrice"] = json!(18000);
    changed["offer"] = json!(true);
    changed["discountPrice"] = json!(16000);
    let resp = send(
        &state,
        Method::POST,
        &format!("/api/listing/update/{id}"),
        Some(changed),
        Some(&cookie),
    );
    assert_eq!(resp.status(), 200);
    let updated = body_json(resp);
    assert_eq!(updated["regularPrice"], 18000.0);
    assert_eq!(updated["offer"], true);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let mine = body_json(get_with_cookie(&state, &format!("/api/user/listings/{user_id}"), &cookie));
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let resp = send(
        &state,
        Method::DELETE,
        &format!("/api/listing/delete/{id}"),
        None,
        Some(&cookie),
    );
    assert_eq!(resp.status(), 200);
    assert_eq!(get(&state, &format!("/api/listing/get/{id}")).status(), 404);
}

fn get_with_cookie(state: &crate::state::AppState, uri: &str, cookie: &str) -> astra::Response {
    send(state, Method::GET, uri, None, Some(cookie))
}

#[test]
fn strangers_cannot_touch_a_listing() {
    let state = test_state();
    let (_, owner) = sign_in_new_user(&state, "owner");
    let (_, other) = sign_in_new_user(&state, "stranger");

    let created = body_json(send(&state, Method::POST, "/api/listing/create", Some(payload()), Some(&owner)));
    let id = created["id"].as_str().unwrap();

    let resp = send(
        &state,
        Method::POST,
        &format!("/api/listing/update/{id}"),
        Some(payload()),
        Some(&other),
    );
    assert_eq!(resp.status(), 403);

    let resp = send(&state, Method::DELETE, &format!("/api/listing/delete/{id}"), None, Some(&other));
    assert_eq!(resp.status(), 403);

    let resp = send(&state, Method::DELETE, "/api/listing/delete/missing", None, Some(&other));
    assert_eq!(resp.status(), 404);
}

#[test]
fn invalid_listing_is_rejected() {
    let state = test_state();
    let (_, cookie) = sign_in_new_user(&state, "owner");

    let mut bad = payload();
    bad["name"] = json!("Too short");
    let resp = send(&state, Method::POST, "/api/listing/create", Some(bad), Some(&cookie));
    assert_eq!(resp.status(), 400);

    let mut bad = payload();
    bad["imageUrls"] = json!([]);
    let resp = send(&state, Method::POST, "/api/listing/create", Some(bad), Some(&cookie));
    assert_eq!(resp.status(), 400);
}

#[test]
fn payload_matches_domain_fixture() {
    let parsed: crate::domain::listing::NewListing = serde_json::from_value(payload()).unwrap();
    let mut expected = sample();
    expected.parking = true;
    assert_eq!(parsed, expected);
}
