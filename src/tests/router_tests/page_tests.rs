use crate::domain::listing::tests::sample;
use crate::tests::utils::{body_string, get, seed_listings, test_state};

fn numbered(n: usize) -> Vec<crate::domain::listing::NewListing> {
    (0..n)
        .map(|i| {
            let mut l = sample();
            l.name = format!("Lake view cottage {i:02}");
            l
        })
        .collect()
}

#[test]
fn home_page_renders_shelves() {
    let state = test_state();
    seed_listings(&state, numbered(2));

    let resp = get(&state, "/");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("<html"));
    assert!(body.contains("Lake view cottage 01"));
}

#[test]
fn search_page_shows_first_page_and_show_more() {
    let state = test_state();
    seed_listings(&state, numbered(10));

    let body = body_string(get(&state, "/search?city=jaipur"));
    assert!(body.contains(r#"id="results""#));
    assert!(body.contains("Lake view cottage 09"));
    assert!(!body.contains("Lake view cottage 01"));
    assert!(body.contains("/search/more?"));
    assert!(body.contains("startIndex=8"));
}

#[test]
fn show_more_returns_a_partial() {
    let state = test_state();
    seed_listings(&state, numbered(10));

    let resp = get(&state, "/search/more?city=jaipur&startIndex=8");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(!body.contains("<html"));
    assert!(body.contains("Lake view cottage 01"));
    assert!(body.contains("Lake view cottage 00"));
    assert!(!body.contains("Show more"));
}

#[test]
fn empty_search_says_so() {
    let state = test_state();
    let body = body_string(get(&state, "/search?city=Atlantis"));
    assert!(body.contains("No listing found!"));
}

#[test]
fn invalid_query_renders_html_error() {
    let state = test_state();
    let resp = get(&state, "/search?startIndex=-4");
    assert_eq!(resp.status(), 400);
    let body = body_string(resp);
    assert!(body.contains("<html"));
    assert!(body.contains("startIndex"));
}

#[test]
fn listing_page_and_missing_listing() {
    let state = test_state();
    let ids = seed_listings(&state, numbered(1));

    let body = body_string(get(&state, &format!("/listing/{}", ids[0])));
    assert!(body.contains("Lake view cottage 00"));

    assert_eq!(get(&state, "/listing/nope").status(), 404);
    assert_eq!(get(&state, "/no/such/page").status(), 404);
}

#[test]
fn about_page_loads() {
    let state = test_state();
    let resp = get(&state, "/about");
    assert_eq!(resp.status(), 200);
}

#[test]
fn stylesheet_is_served() {
    let state = test_state();
    let resp = get(&state, "/static/main.css");
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Content-Type"], "text/css; charset=utf-8");
}
