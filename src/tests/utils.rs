use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::db::{listings, users};
use crate::domain::listing::NewListing;
use crate::media::{check_image, ImageHost, UploadError};
use crate::router::route;
use crate::state::AppState;
use astra::{Body, Response};
use chrono::{Duration, TimeZone, Utc};
use http::{Method, Request};
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// Fresh SQLite file per call so parallel tests never share rows.
pub fn init_test_db() -> Database {
    let n = NEXT_DB.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "estate_search_test_{}_{n}.sqlite3",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

/// Records uploads instead of talking to a CDN.
#[derive(Default)]
pub struct FakeImageHost {
    pub uploads: Mutex<Vec<(String, String, usize)>>,
}

impl ImageHost for FakeImageHost {
    fn upload(&self, bytes: Vec<u8>, filename: &str, content_type: &str) -> Result<String, UploadError> {
        check_image(&bytes, content_type)?;
        self.uploads
            .lock()
            .unwrap()
            .push((filename.to_string(), content_type.to_string(), bytes.len()));
        Ok(format!("https://cdn.test/{filename}"))
    }
}

pub fn test_state() -> AppState {
    AppState {
        db: init_test_db(),
        config: AppConfig::default(),
        mailer: None,
        images: Some(Box::new(FakeImageHost::default())),
    }
}

pub fn get(state: &AppState, uri: &str) -> Response {
    send(state, Method::GET, uri, None, None)
}

pub fn send(
    state: &AppState,
    method: Method,
    uri: &str,
    json: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(c) = cookie {
        builder = builder.header("Cookie", c);
    }
    let body = match json {
        Some(v) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    route_raw(state, builder.body(body).unwrap())
}

pub fn route_raw(state: &AppState, req: astra::Request) -> Response {
    route(req, state)
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).unwrap()
}

/// `name=value` pair from a Set-Cookie header, ready for a Cookie header.
pub fn cookie_from(resp: &Response) -> String {
    let raw = resp
        .headers()
        .get("Set-Cookie")
        .expect("no Set-Cookie header")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

/// Sign up and sign in through the API. Returns (user id, cookie).
pub fn sign_in_new_user(state: &AppState, username: &str) -> (i64, String) {
    let email = format!("{username}@example.com");
    let resp = send(
        state,
        Method::POST,
        "/api/auth/signup",
        Some(serde_json::json!({ "username": username, "email": email, "password": "hunter22!" })),
        None,
    );
    assert_eq!(resp.status(), 201);

    let resp = send(
        state,
        Method::POST,
        "/api/auth/signin",
        Some(serde_json::json!({ "email": email, "password": "hunter22!" })),
        None,
    );
    assert_eq!(resp.status(), 200);
    let cookie = cookie_from(&resp);
    let user = body_json(resp);
    (user["id"].as_i64().unwrap(), cookie)
}

/// Insert listings straight into the db, one minute apart, oldest first.
pub fn seed_listings(state: &AppState, items: Vec<NewListing>) -> Vec<String> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    state
        .db
        .with_conn(|conn| {
            let owner = users::insert_user(conn, "seeder", "seeder@example.com", "x", 0)?;
            let mut ids = Vec::new();
            for (i, item) in items.iter().enumerate() {
                let at = base + Duration::minutes(i as i64);
                ids.push(listings::insert_listing(conn, owner, item, at)?.id);
            }
            Ok(ids)
        })
        .unwrap()
}
