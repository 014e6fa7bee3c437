// templates/pages/listing.rs

use crate::domain::listing::{Listing, ListingType};
use crate::templates::{
    components::{format_price, price_label},
    desktop_layout,
};
use maud::{html, Markup};

pub fn listing_page(listing: &Listing) -> Markup {
    desktop_layout(
        &listing.name,
        html! {
            main class="container listing" {
                div class="gallery" {
                    @for url in &listing.image_urls {
                        img src=(url) alt=(listing.name);
                    }
                }

                h1 { (listing.name) " - " (price_label(listing)) }
                p class="address" { (listing.address) ", " (listing.city) }

                p class="badges" {
                    span class="badge" {
                        @match listing.listing_type {
                            ListingType::Rent => "For Rent",
                            ListingType::Sale => "For Sale",
                        }
                    }
                    @if listing.offer {
                        span class="badge offer" {
                            (format_price(listing.regular_price - listing.discount_price)) " OFF"
                        }
                    }
                }

                p class="description" { strong { "Description - " } (listing.description) }

                ul class="features" {
                    li { (listing.bedrooms) " Beds" }
                    li { (listing.bathrooms) " Baths" }
                    li { @if listing.parking { "Parking spot" } @else { "No parking" } }
                    li { @if listing.furnished { "Furnished" } @else { "Unfurnished" } }
                }

                @if listing.owner_name.is_some() || listing.mobile_number.is_some() {
                    section class="card contact" {
                        h3 { "Contact owner" }
                        @if let Some(name) = &listing.owner_name { p { (name) } }
                        @if let Some(phone) = &listing.mobile_number {
                            p { a href=(format!("tel:{phone}")) { (phone) } }
                        }
                    }
                }
            }
        },
    )
}
