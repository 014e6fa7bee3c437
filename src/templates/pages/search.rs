// templates/pages/search.rs

use crate::domain::listing::Listing;
use crate::search::{Page, SearchFilter};
use crate::templates::{
    components::{filter_sidebar, result_cards},
    desktop_layout,
};
use maud::{html, Markup};

pub fn search_page(filter: &SearchFilter, page: &Page<Listing>) -> Markup {
    desktop_layout(
        "Search",
        html! {
            main class="container search" {
                (filter_sidebar(filter))
                section class="results" {
                    h1 {
                        "Properties"
                        @if !filter.city.is_empty() {
                            " in " span class="accent" { (filter.city) }
                        }
                    }
                    @if page.listings.is_empty() {
                        p class="empty" { "No listing found!" }
                    } @else {
                        div class="grid" id="results" {
                            (result_cards(page, filter))
                        }
                    }
                }
            }
        },
    )
}
