// src/search/filter.rs

use std::collections::HashMap;

use crate::domain::listing::ListingType;
use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(ListingType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreatedAt,
    RegularPrice,
}

impl SortKey {
    /// Name used in query strings and the sort dropdown.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "createdAt",
            SortKey::RegularPrice => "regularPrice",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Canonical, request-scoped search constraints.
///
/// The boolean fields are a real tri-state: `None` leaves the field
/// unconstrained. Query strings can only ever produce `None` or
/// `Some(true)` (see [`SearchFilter::from_params`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchFilter {
    pub search_term: String,
    pub city: String,
    pub listing_type: TypeFilter,
    pub parking: Option<bool>,
    pub furnished: Option<bool>,
    pub offer: Option<bool>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub start_index: usize,
}

impl SearchFilter {
    /// Normalize decoded query-string pairs.
    ///
    /// - `type`: missing, empty or unknown means `all`.
    /// - `parking`/`furnished`/`offer`: only `"true"` (after trimming, case
    ///   sensitive) constrains; `"false"` and anything else leave the field
    ///   unconstrained.
    /// - `sort`/`order`: defaults `createdAt`/`desc`; other values are rejected.
    /// - `startIndex`: defaults to 0, must be an integer in `0..=i64::MAX`.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ServerError> {
        let get = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let listing_type = match get("type") {
            None | Some("all") => TypeFilter::All,
            Some(raw) => match raw.parse::<ListingType>() {
                Ok(t) => TypeFilter::Only(t),
                Err(_) => {
                    log::debug!("ignoring unknown listing type filter `{raw}`");
                    TypeFilter::All
                }
            },
        };

        let sort = match get("sort") {
            None => SortKey::default(),
            Some("createdAt") | Some("created_at") => SortKey::CreatedAt,
            Some("regularPrice") => SortKey::RegularPrice,
            Some(other) => {
                return Err(ServerError::invalid_param(
                    "sort",
                    format!("`{other}` is not one of createdAt, regularPrice"),
                ))
            }
        };

        let order = match get("order") {
            None => SortOrder::default(),
            Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            Some(other) => {
                return Err(ServerError::invalid_param(
                    "order",
                    format!("`{other}` is not one of asc, desc"),
                ))
            }
        };

        let start_index = match get("startIndex") {
            None => 0,
            // Bounded by i64 so the offset always binds as a SQLite integer.
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    ServerError::invalid_param(
                        "startIndex",
                        format!("`{raw}` is not an integer between 0 and {}", i64::MAX),
                    )
                })?,
        };

        Ok(SearchFilter {
            search_term: get("searchTerm").unwrap_or_default().to_string(),
            city: get("city").unwrap_or_default().to_string(),
            listing_type,
            parking: only_true(get("parking")),
            furnished: only_true(get("furnished")),
            offer: only_true(get("offer")),
            sort,
            order,
            start_index,
        })
    }

    /// Render back to query pairs (defaults omitted), for "show more" links.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if !self.search_term.is_empty() {
            out.push(("searchTerm", self.search_term.clone()));
        }
        if !self.city.is_empty() {
            out.push(("city", self.city.clone()));
        }
        if let TypeFilter::Only(t) = self.listing_type {
            out.push(("type", t.as_str().to_string()));
        }
        for (key, flag) in [
            ("parking", self.parking),
            ("furnished", self.furnished),
            ("offer", self.offer),
        ] {
            // `false` has no query-string spelling.
            if flag == Some(true) {
                out.push((key, "true".to_string()));
            }
        }
        out.push(("sort", self.sort.as_param().to_string()));
        out.push(("order", self.order.as_param().to_string()));
        if self.start_index > 0 {
            out.push(("startIndex", self.start_index.to_string()));
        }
        out
    }
}

fn only_true(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true") => Some(true),
        _ => None,
    }
}
