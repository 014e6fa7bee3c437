use maud::{html, Markup};

pub mod error;
pub mod listing_card;
pub mod search_panel;

pub use error::error_page;
pub use listing_card::{format_price, listing_card, price_label};
pub use search_panel::{filter_sidebar, result_cards};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}
