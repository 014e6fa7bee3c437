pub mod listing;
pub mod user;
