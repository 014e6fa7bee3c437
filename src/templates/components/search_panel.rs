use crate::domain::listing::{Listing, ListingType};
use crate::search::{Page, SearchFilter, SortKey, SortOrder, TypeFilter};
use crate::templates::components::listing_card;
use maud::{html, Markup};

/// Encode a filter as a query string (no leading `?`).
pub fn query_string(filter: &SearchFilter) -> String {
    let mut ser = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in filter.to_params() {
        ser.append_pair(k, &v);
    }
    ser.finish()
}

pub fn filter_sidebar(filter: &SearchFilter) -> Markup {
    let type_choice = |value: &str, label: &str, checked: bool| {
        html! {
            label class="choice" {
                input type="radio" name="type" value=(value) checked[checked];
                " " (label)
            }
        }
    };

    html! {
        aside class="filters" {
            form action="/search" method="get" {
                label for="searchTerm" { "Search term" }
                input type="text" id="searchTerm" name="searchTerm"
                    placeholder="Search..." value=(filter.search_term);

                label for="city" { "City" }
                input type="text" id="city" name="city" value=(filter.city);

                fieldset {
                    legend { "Type" }
                    (type_choice("all", "Rent & Sale", filter.listing_type == TypeFilter::All))
                    (type_choice("rent", "Rent", filter.listing_type == TypeFilter::Only(ListingType::Rent)))
                    (type_choice("sale", "Sale", filter.listing_type == TypeFilter::Only(ListingType::Sale)))
                    label class="choice" {
                        input type="checkbox" name="offer" value="true" checked[filter.offer == Some(true)];
                        " Offer"
                    }
                }

                fieldset {
                    legend { "Amenities" }
                    label class="choice" {
                        input type="checkbox" name="parking" value="true" checked[filter.parking == Some(true)];
                        " Parking"
                    }
                    label class="choice" {
                        input type="checkbox" name="furnished" value="true" checked[filter.furnished == Some(true)];
                        " Furnished"
                    }
                }

                label for="sort" { "Sort by" }
                select id="sort" name="sort" {
                    option value="createdAt" selected[filter.sort == SortKey::CreatedAt] { "Date listed" }
                    option value="regularPrice" selected[filter.sort == SortKey::RegularPrice] { "Price" }
                }
                select id="order" name="order" aria-label="Order" {
                    option value="desc" selected[filter.order == SortOrder::Desc] { "High to low / latest" }
                    option value="asc" selected[filter.order == SortOrder::Asc] { "Low to high / oldest" }
                }

                button type="submit" class="primary" { "Apply filter" }
            }
        }
    }
}

/// Cards for one page, followed by a "Show more" button that swaps itself
/// for the next page. Used both inline and as the htmx partial.
pub fn result_cards(page: &Page<Listing>, filter: &SearchFilter) -> Markup {
    let next = SearchFilter {
        start_index: page.next_start_index,
        ..filter.clone()
    };

    html! {
        @for listing in &page.listings {
            (listing_card(listing))
        }
        @if page.has_more {
            button
                class="show-more"
                hx-get=(format!("/search/more?{}", query_string(&next)))
                hx-target="this"
                hx-swap="outerHTML"
            { "Show more" }
        }
    }
}
