use astra::Request;
use chrono::Utc;
use serde_json::json;

use crate::auth::sessions::require_user;
use crate::db::listings;
use crate::domain::listing::{Listing, NewListing};
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{now_secs, parse_query, read_json};
use crate::responses::json_response;
use crate::search::search_listings;
use crate::state::AppState;

/// `GET /api/listing/get` with the search query string.
pub fn search(req: &Request, state: &AppState) -> ResultResp {
    let params = parse_query(req);
    let (_, page) = search_listings(&state.db, &params)?;
    json_response(200, &page)
}

pub fn get(state: &AppState, id: &str) -> ResultResp {
    let listing = state
        .db
        .with_conn(|conn| listings::get_listing(conn, id))?
        .ok_or(ServerError::NotFound)?;
    json_response(200, &listing)
}

pub fn create(mut req: Request, state: &AppState) -> ResultResp {
    let user_id = require_user(&req, &state.db, now_secs())?;
    let payload: NewListing = read_json(&mut req)?;
    let payload = payload.validated().map_err(ServerError::Validation)?;

    let listing = state
        .db
        .with_conn(|conn| listings::insert_listing(conn, user_id, &payload, Utc::now()))?;
    log::info!("user {user_id} created listing {}", listing.id);
    json_response(201, &listing)
}

/// Load a listing and make sure `user_id` owns it.
fn owned_listing(state: &AppState, id: &str, user_id: i64, action: &str) -> Result<Listing, ServerError> {
    let listing = state
        .db
        .with_conn(|conn| listings::get_listing(conn, id))?
        .ok_or(ServerError::NotFound)?;
    if listing.owner_ref != user_id {
        return Err(ServerError::Forbidden(format!("you can only {action} your own listings")));
    }
    Ok(listing)
}

pub fn update(mut req: Request, state: &AppState, id: &str) -> ResultResp {
    let user_id = require_user(&req, &state.db, now_secs())?;
    owned_listing(state, id, user_id, "update")?;

    let payload: NewListing = read_json(&mut req)?;
    let payload = payload.validated().map_err(ServerError::Validation)?;

    let listing = state
        .db
        .with_conn(|conn| listings::update_listing(conn, id, &payload, Utc::now()))?
        .ok_or(ServerError::NotFound)?;
    json_response(200, &listing)
}

pub fn delete(req: &Request, state: &AppState, id: &str) -> ResultResp {
    let user_id = require_user(req, &state.db, now_secs())?;
    owned_listing(state, id, user_id, "delete")?;

    if !state.db.with_conn(|conn| listings::delete_listing(conn, id))? {
        return Err(ServerError::NotFound);
    }
    log::info!("user {user_id} deleted listing {id}");
    json_response(200, &json!({ "success": true, "message": "Listing has been deleted" }))
}
