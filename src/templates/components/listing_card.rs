use crate::domain::listing::{Listing, ListingType};
use maud::{html, Markup};

const DESCRIPTION_PREVIEW_CHARS: usize = 90;

pub fn format_price(amount: f64) -> String {
    // Whole rupees with thousands separators; listings never carry paise.
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if whole < 0 {
        out.insert(0, '-');
    }
    format!("₹{out}")
}

fn preview(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{}…", cut.trim_end())
}

pub fn price_label(listing: &Listing) -> Markup {
    html! {
        span class="price" {
            (format_price(listing.effective_price()))
            @if listing.listing_type == ListingType::Rent { " / month" }
        }
        @if listing.offer {
            " "
            s class="regular-price" { (format_price(listing.regular_price)) }
        }
    }
}

pub fn listing_card(listing: &Listing) -> Markup {
    html! {
        article class="card listing-card" {
            a href=(format!("/listing/{}", listing.id)) {
                @if let Some(cover) = listing.cover_url() {
                    img src=(cover) alt=(listing.name) loading="lazy";
                }
                div class="card-body" {
                    h3 class="truncate" { (listing.name) }
                    p class="address" { (listing.address) ", " (listing.city) }
                    p class="description" { (preview(&listing.description)) }
                    p { (price_label(listing)) }
                    p class="rooms" {
                        (listing.bedrooms) @if listing.bedrooms > 1 { " beds" } @else { " bed" }
                        " · "
                        (listing.bathrooms) @if listing.bathrooms > 1 { " baths" } @else { " bath" }
                    }
                }
            }
        }
    }
}
