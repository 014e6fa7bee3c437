// templates/pages/home.rs

use crate::domain::listing::Listing;
use crate::templates::{components::listing_card, desktop_layout};
use maud::{html, Markup};

pub struct HomeVm {
    pub offers: Vec<Listing>,
    pub rentals: Vec<Listing>,
    pub sales: Vec<Listing>,
}

fn shelf(title: &str, more_href: &str, listings: &[Listing]) -> Markup {
    html! {
        @if !listings.is_empty() {
            section class="shelf" {
                h2 { (title) }
                a href=(more_href) { "Show more" }
                div class="grid" {
                    @for l in listings {
                        (listing_card(l))
                    }
                }
            }
        }
    }
}

pub fn home_page(vm: &HomeVm) -> Markup {
    desktop_layout(
        "Home",
        html! {
            main class="container" {
                section class="hero" {
                    h1 { "Find your next " span class="accent" { "perfect" } " place with ease" }
                    p class="lead" { "Homes for sale and rent, posted directly by their owners." }
                    form action="/search" method="get" class="hero-search" {
                        input type="text" name="searchTerm" placeholder="Search listings...";
                        input type="text" name="city" placeholder="City";
                        button type="submit" class="primary" { "Search" }
                    }
                }

                (shelf("Recent offers", "/search?offer=true", &vm.offers))
                (shelf("Recent places for rent", "/search?type=rent", &vm.rentals))
                (shelf("Recent places for sale", "/search?type=sale", &vm.sales))

                @if vm.offers.is_empty() && vm.rentals.is_empty() && vm.sales.is_empty() {
                    p class="empty" { "No listings yet." }
                }
            }
        },
    )
}
