use crate::domain::listing::tests::sample;
use crate::domain::listing::{ListingType, NewListing};
use crate::db::connection::Database;
use crate::tests::utils::{body_json, body_string, get, seed_listings, test_state};
use std::collections::HashSet;

/// Ten Jaipur listings; 3, 6 and 9 are on offer, every even one is for sale.
fn jaipur(i: usize) -> NewListing {
    let mut l = sample();
    l.name = format!("Jaipur home number {i:02}");
    l.regular_price = 10_000.0 + (i as f64) * 1_000.0;
    l.listing_type = if i % 2 == 0 { ListingType::Sale } else { ListingType::Rent };
    l.parking = i % 3 == 0;
    if i % 3 == 0 && i > 0 {
        l.offer = true;
        l.discount_price = l.regular_price - 500.0;
    }
    l
}

fn names(v: &serde_json::Value) -> Vec<String> {
    v["listings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn offer_filter_returns_matching_listings_newest_first() {
    let state = test_state();
    seed_listings(&state, (0..10).map(jaipur).collect());

    let resp = get(&state, "/api/listing/get?city=Jaipur&offer=true");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp);

    assert_eq!(
        names(&body),
        vec!["Jaipur home number 09", "Jaipur home number 06", "Jaipur home number 03"]
    );
    assert_eq!(body["hasMore"], false);
    assert_eq!(body["nextStartIndex"], 3);
}

#[test]
fn pages_walk_the_whole_set_without_overlap() {
    let state = test_state();
    seed_listings(&state, (0..10).map(jaipur).collect());

    let first = body_json(get(&state, "/api/listing/get?sort=regularPrice&order=asc"));
    assert_eq!(first["listings"].as_array().unwrap().len(), 8);
    assert_eq!(first["hasMore"], true);
    assert_eq!(first["nextStartIndex"], 8);

    let second = body_json(get(
        &state,
        "/api/listing/get?sort=regularPrice&order=asc&startIndex=8",
    ));
    assert_eq!(second["listings"].as_array().unwrap().len(), 2);
    assert_eq!(second["hasMore"], false);

    let all: Vec<String> = names(&first).into_iter().chain(names(&second)).collect();
    let unique: HashSet<&String> = all.iter().collect();
    assert_eq!(unique.len(), 10);
    assert_eq!(all.first().unwrap(), "Jaipur home number 00");
    assert_eq!(all.last().unwrap(), "Jaipur home number 09");
}

#[test]
fn false_flags_do_not_constrain() {
    let state = test_state();
    seed_listings(&state, (0..10).map(jaipur).collect());

    let body = body_json(get(&state, "/api/listing/get?parking=false&offer=false&type=all"));
    assert_eq!(body["listings"].as_array().unwrap().len(), 8);
    assert_eq!(body["hasMore"], true);
}

#[test]
fn type_and_amenity_filters_combine() {
    let state = test_state();
    seed_listings(&state, (0..10).map(jaipur).collect());

    // Sale listings are the even ones; parking is every third: 0 and 6.
    let body = body_json(get(&state, "/api/listing/get?type=sale&parking=true"));
    let mut got = names(&body);
    got.sort();
    assert_eq!(got, vec!["Jaipur home number 00", "Jaipur home number 06"]);
}

#[test]
fn search_term_is_case_insensitive_and_literal() {
    let state = test_state();
    let mut odd = sample();
    odd.name = "Penthouse with 100% view".into();
    seed_listings(&state, vec![jaipur(1), odd]);

    let body = body_json(get(&state, "/api/listing/get?searchTerm=PENTHOUSE"));
    assert_eq!(names(&body), vec!["Penthouse with 100% view"]);

    let body = body_json(get(&state, "/api/listing/get?searchTerm=%25"));
    assert_eq!(names(&body), vec!["Penthouse with 100% view"]);
}

#[test]
fn empty_result_is_not_an_error() {
    let state = test_state();
    let body = body_json(get(&state, "/api/listing/get?city=Nowhere"));
    assert_eq!(body["listings"].as_array().unwrap().len(), 0);
    assert_eq!(body["hasMore"], false);
    assert_eq!(body["nextStartIndex"], 0);
}

#[test]
fn bad_start_index_is_a_json_400() {
    let state = test_state();
    for bad in ["-1", "abc", "1.5"] {
        let resp = get(&state, &format!("/api/listing/get?startIndex={bad}"));
        assert_eq!(resp.status(), 400, "startIndex={bad}");
        let body = body_json(resp);
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 400);
        assert!(body["message"].as_str().unwrap().contains("startIndex"));
    }
}

#[test]
fn unknown_sort_key_is_rejected() {
    let state = test_state();
    let resp = get(&state, "/api/listing/get?sort=name");
    assert_eq!(resp.status(), 400);
}

#[test]
fn huge_start_index_is_rejected_or_empty() {
    let state = test_state();
    seed_listings(&state, (0..10).map(jaipur).collect());

    for too_big in ["9223372036854775808", "18446744073709551615"] {
        let resp = get(&state, &format!("/api/listing/get?startIndex={too_big}"));
        assert_eq!(resp.status(), 400, "startIndex={too_big}");
        assert_eq!(body_json(resp)["success"], false);
    }

    let resp = get(&state, "/api/listing/get?startIndex=9223372036854775807");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp);
    assert!(body["listings"].as_array().unwrap().is_empty());
    assert_eq!(body["hasMore"], false);
    assert_eq!(body["nextStartIndex"], i64::MAX as u64);
}

#[test]
fn unopenable_database_is_a_json_503() {
    let mut state = test_state();
    let missing = std::env::temp_dir()
        .join(format!("estate_search_missing_{}", std::process::id()))
        .join("nested")
        .join("listings.sqlite3");
    state.db = Database::new(missing.to_string_lossy().into_owned());

    let resp = get(&state, "/api/listing/get?city=Jaipur");
    assert_eq!(resp.status(), 503);
    let body = body_json(resp);
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 503);
    assert!(body.get("listings").is_none());

    let resp = get(&state, "/search?city=Jaipur");
    assert_eq!(resp.status(), 503);
    assert!(!body_string(resp).contains("listing-card"));
}

#[test]
fn failing_query_returns_no_partial_results() {
    let state = test_state();
    seed_listings(&state, (0..10).map(jaipur).collect());
    state
        .db
        .with_conn(|conn| Ok(conn.execute_batch("drop table listings")?))
        .unwrap();

    let resp = get(&state, "/api/listing/get");
    assert_eq!(resp.status(), 503);
    let body = body_json(resp);
    assert_eq!(body["success"], false);
    assert!(body.get("listings").is_none());
}
