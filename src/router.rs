use crate::errors::{ResultResp, ServerError};
use crate::handlers::{auth, listings, pages, upload, users};
use crate::responses::error_response;
use crate::state::AppState;
use astra::{Request, Response};

/// Dispatch on method and path segments.
pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        // Pages
        ("GET", []) => pages::home(state),
        ("GET", ["search"]) => pages::search(&req, state),
        ("GET", ["search", "more"]) => pages::search_more(&req, state),
        ("GET", ["listing", id]) => pages::listing(state, id),
        ("GET", ["about"]) => pages::about(),
        ("GET", ["static", "main.css"]) => pages::stylesheet(),

        // Listings API
        ("GET", ["api", "listing", "get"]) => listings::search(&req, state),
        ("GET", ["api", "listing", "get", id]) => listings::get(state, id),
        ("POST", ["api", "listing", "create"]) => listings::create(req, state),
        ("POST", ["api", "listing", "update", id]) => listings::update(req, state, id),
        ("DELETE", ["api", "listing", "delete", id]) => listings::delete(&req, state, id),

        // Accounts API
        ("POST", ["api", "auth", "signup"]) => auth::signup(req, state),
        ("POST", ["api", "auth", "signin"]) => auth::signin(req, state),
        ("GET", ["api", "auth", "signout"]) => auth::signout(&req, state),
        ("GET", ["api", "user", "listings", id]) => users::listings(&req, state, id),
        ("POST", ["api", "user", "update", id]) => users::update(req, state, id),
        ("DELETE", ["api", "user", "delete", id]) => users::delete(&req, state, id),

        ("POST", ["api", "upload"]) => upload::upload(req, state),

        _ => Err(ServerError::NotFound),
    }
}

/// `handle` plus error rendering and an access log line.
pub fn route(req: Request, state: &AppState) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let resp = match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => error_response(&path, err),
    };

    log::info!("{method} {path} -> {}", resp.status().as_u16());
    resp
}
