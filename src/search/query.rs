// src/search/query.rs

use crate::domain::listing::ListingType;
use crate::search::filter::{SearchFilter, SortKey, SortOrder, TypeFilter};
use crate::search::pager::PAGE_FETCH_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Parking,
    Furnished,
    Offer,
}

/// One conjunct of the listing query. Storage-neutral.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    TypeIs(ListingType),
    /// Case-insensitive substring match on `name`.
    NameContains(String),
    /// Case-insensitive substring match on `city`.
    CityContains(String),
    FlagIs(Flag, bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub predicates: Vec<Predicate>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub offset: usize,
    pub limit: usize,
}

impl ListingQuery {
    pub fn from_filter(filter: &SearchFilter) -> Self {
        let mut predicates = Vec::new();

        if let TypeFilter::Only(t) = filter.listing_type {
            predicates.push(Predicate::TypeIs(t));
        }
        if !filter.search_term.is_empty() {
            predicates.push(Predicate::NameContains(filter.search_term.clone()));
        }
        if !filter.city.is_empty() {
            predicates.push(Predicate::CityContains(filter.city.clone()));
        }
        for (flag, value) in [
            (Flag::Parking, filter.parking),
            (Flag::Furnished, filter.furnished),
            (Flag::Offer, filter.offer),
        ] {
            if let Some(v) = value {
                predicates.push(Predicate::FlagIs(flag, v));
            }
        }

        ListingQuery {
            predicates,
            sort: filter.sort,
            order: filter.order,
            offset: filter.start_index,
            limit: PAGE_FETCH_SIZE,
        }
    }
}
