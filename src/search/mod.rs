//! Listing search: query-string normalization, translation to a
//! storage-neutral query, and offset pagination.

pub mod filter;
pub mod pager;
pub mod query;

use std::collections::HashMap;

use crate::db::connection::Database;
use crate::db::listings;
use crate::domain::listing::Listing;
use crate::errors::ServerError;

pub use filter::{SearchFilter, SortKey, SortOrder, TypeFilter};
pub use pager::Page;
pub use query::{Flag, ListingQuery, Predicate};

/// Run one search request end to end. Nothing is kept between calls;
/// `startIndex` in `params` is the whole continuation token.
pub fn search_listings(
    db: &Database,
    params: &HashMap<String, String>,
) -> Result<(SearchFilter, Page<Listing>), ServerError> {
    let filter = SearchFilter::from_params(params)?;
    let page = run_filter(db, &filter)?;
    Ok((filter, page))
}

pub fn run_filter(db: &Database, filter: &SearchFilter) -> Result<Page<Listing>, ServerError> {
    let query = ListingQuery::from_filter(filter);
    let fetched = db.with_conn(|conn| listings::search(conn, &query))?;
    log::debug!(
        "search {:?} returned {} rows at offset {}",
        query.predicates,
        fetched.len(),
        query.offset
    );
    Ok(Page::from_fetched(fetched, filter.start_index))
}
