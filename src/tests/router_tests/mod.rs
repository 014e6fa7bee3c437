mod account_tests;
mod listing_api_tests;
mod page_tests;
mod search_api_tests;
