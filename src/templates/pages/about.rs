// templates/pages/about.rs

use crate::templates::{components::card, desktop_layout};
use maud::{html, Markup};

pub fn about_page() -> Markup {
    desktop_layout(
        "About",
        html! {
            main class="container narrow" {
                h1 { "About Estate Search" }
                p class="lead" {
                    "A marketplace where owners list homes for sale or rent and buyers find them without a middleman."
                }
                (card("Search", html! {
                    p { "Filter by city, type, offers and amenities, then sort by price or date listed." }
                }))
                (card("List your property", html! {
                    p { "Create an account, upload up to six photos and publish your listing for free." }
                }))
            }
        },
    )
}
