use astra::{Body, Request, ResponseBuilder};

use crate::db::listings;
use crate::domain::listing::{Listing, ListingType};
use crate::errors::{ResultResp, ServerError};
use crate::handlers::parse_query;
use crate::responses::html_response;
use crate::search::{run_filter, search_listings, SearchFilter, TypeFilter};
use crate::state::AppState;
use crate::templates::components::result_cards;
use crate::templates::pages::{about_page, home_page, listing_page, search_page, HomeVm};

const SHELF_SIZE: usize = 4;
const STYLESHEET: &str = include_str!("../../static/main.css");

fn shelf(state: &AppState, filter: SearchFilter) -> Result<Vec<Listing>, ServerError> {
    let mut page = run_filter(&state.db, &filter)?;
    page.listings.truncate(SHELF_SIZE);
    Ok(page.listings)
}

pub fn home(state: &AppState) -> ResultResp {
    let vm = HomeVm {
        offers: shelf(state, SearchFilter { offer: Some(true), ..Default::default() })?,
        rentals: shelf(
            state,
            SearchFilter { listing_type: TypeFilter::Only(ListingType::Rent), ..Default::default() },
        )?,
        sales: shelf(
            state,
            SearchFilter { listing_type: TypeFilter::Only(ListingType::Sale), ..Default::default() },
        )?,
    };
    html_response(home_page(&vm))
}

pub fn search(req: &Request, state: &AppState) -> ResultResp {
    let (filter, page) = search_listings(&state.db, &parse_query(req))?;
    html_response(search_page(&filter, &page))
}

/// htmx partial: the next cards plus a fresh "Show more" button.
pub fn search_more(req: &Request, state: &AppState) -> ResultResp {
    let (filter, page) = search_listings(&state.db, &parse_query(req))?;
    html_response(result_cards(&page, &filter))
}

pub fn listing(state: &AppState, id: &str) -> ResultResp {
    let listing = state
        .db
        .with_conn(|conn| listings::get_listing(conn, id))?
        .ok_or(ServerError::NotFound)?;
    html_response(listing_page(&listing))
}

pub fn about() -> ResultResp {
    html_response(about_page())
}

pub fn stylesheet() -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_CSS_UTF_8.as_ref())
        .header("Cache-Control", "public, max-age=3600")
        .body(Body::from(STYLESHEET))
        .map_err(|_| ServerError::InternalError)
}
