// src/search/pager.rs

use serde::Serialize;

/// Rows read per search: one more than we show, the extra one only proves
/// another page exists.
pub const PAGE_FETCH_SIZE: usize = 9;
pub const PAGE_DISPLAY_SIZE: usize = PAGE_FETCH_SIZE - 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub listings: Vec<T>,
    pub has_more: bool,
    /// `startIndex` to send for the following page.
    pub next_start_index: usize,
}

impl<T> Page<T> {
    /// Build a page from at most `PAGE_FETCH_SIZE` rows fetched at `start_index`.
    pub fn from_fetched(mut fetched: Vec<T>, start_index: usize) -> Self {
        let has_more = fetched.len() > PAGE_DISPLAY_SIZE;
        fetched.truncate(PAGE_DISPLAY_SIZE);
        let next_start_index = start_index.saturating_add(fetched.len());
        Page {
            listings: fetched,
            has_more,
            next_start_index,
        }
    }
}
