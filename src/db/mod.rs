pub mod connection;
pub mod listings;
pub mod users;
