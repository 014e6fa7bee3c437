pub mod about;
pub mod home;
pub mod listing;
pub mod search;

pub use about::about_page;
pub use home::{home_page, HomeVm};
pub use listing::listing_page;
pub use search::search_page;
