use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::auth::token::generate_id;
use crate::domain::listing::{Listing, ListingType, NewListing};
use crate::errors::ServerError;
use crate::search::{Flag, ListingQuery, Predicate, SortKey, SortOrder};

const LISTING_COLUMNS: &str = r#"
    id,              -- 0
    name,            -- 1
    description,     -- 2
    address,         -- 3
    city,            -- 4
    listing_type,    -- 5
    bedrooms,        -- 6
    bathrooms,       -- 7
    regular_price,   -- 8
    discount_price,  -- 9
    offer,           -- 10
    parking,         -- 11
    furnished,       -- 12
    image_urls,      -- 13
    owner_name,      -- 14
    mobile_number,   -- 15
    owner_ref,       -- 16
    created_at,      -- 17
    updated_at       -- 18
"#;

fn conversion_err(
    idx: usize,
    e: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into())
}

fn millis_to_utc(idx: usize, ms: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| conversion_err(idx, format!("timestamp {ms} out of range")))
}

fn listing_from_row(row: &Row<'_>) -> rusqlite::Result<Listing> {
    let listing_type: String = row.get(5)?;
    let image_urls: String = row.get(13)?;

    Ok(Listing {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        address: row.get(3)?,
        city: row.get(4)?,
        listing_type: listing_type
            .parse::<ListingType>()
            .map_err(|e| conversion_err(5, e))?,
        bedrooms: row.get(6)?,
        bathrooms: row.get(7)?,
        regular_price: row.get(8)?,
        discount_price: row.get(9)?,
        offer: row.get(10)?,
        parking: row.get(11)?,
        furnished: row.get(12)?,
        image_urls: serde_json::from_str(&image_urls).map_err(|e| conversion_err(13, e))?,
        owner_name: row.get(14)?,
        mobile_number: row.get(15)?,
        owner_ref: row.get(16)?,
        created_at: millis_to_utc(17, row.get(17)?)?,
        updated_at: millis_to_utc(18, row.get(18)?)?,
    })
}

fn image_urls_json(urls: &[String]) -> Result<String, ServerError> {
    serde_json::to_string(urls).map_err(|_| ServerError::InternalError)
}

/// Insert a validated listing owned by `owner_ref`.
pub fn insert_listing(
    conn: &Connection,
    owner_ref: i64,
    listing: &NewListing,
    now: DateTime<Utc>,
) -> Result<Listing, ServerError> {
    let id = generate_id();
    let now_ms = now.timestamp_millis();

    conn.execute(
        r#"
        insert into listings (
            id, name, description, address, city, listing_type,
            bedrooms, bathrooms, regular_price, discount_price,
            offer, parking, furnished, image_urls,
            owner_name, mobile_number, owner_ref, created_at, updated_at
        ) values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?18)
        "#,
        params![
            id,
            listing.name,
            listing.description,
            listing.address,
            listing.city,
            listing.listing_type.as_str(),
            listing.bedrooms,
            listing.bathrooms,
            listing.regular_price,
            listing.discount_price,
            listing.offer,
            listing.parking,
            listing.furnished,
            image_urls_json(&listing.image_urls)?,
            listing.owner_name,
            listing.mobile_number,
            owner_ref,
            now_ms,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert listing failed: {e}")))?;

    get_listing(conn, &id)?.ok_or(ServerError::InternalError)
}

pub fn get_listing(conn: &Connection, id: &str) -> Result<Option<Listing>, ServerError> {
    conn.query_row(
        &format!("select {LISTING_COLUMNS} from listings where id = ?"),
        params![id],
        listing_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select listing failed: {e}")))
}

/// Replace every mutable field. `created_at` and `owner_ref` never change.
pub fn update_listing(
    conn: &Connection,
    id: &str,
    listing: &NewListing,
    now: DateTime<Utc>,
) -> Result<Option<Listing>, ServerError> {
    let updated = conn
        .execute(
            r#"
            update listings set
                name = ?1, description = ?2, address = ?3, city = ?4, listing_type = ?5,
                bedrooms = ?6, bathrooms = ?7, regular_price = ?8, discount_price = ?9,
                offer = ?10, parking = ?11, furnished = ?12, image_urls = ?13,
                owner_name = ?14, mobile_number = ?15, updated_at = ?16
            where id = ?17
            "#,
            params![
                listing.name,
                listing.description,
                listing.address,
                listing.city,
                listing.listing_type.as_str(),
                listing.bedrooms,
                listing.bathrooms,
                listing.regular_price,
                listing.discount_price,
                listing.offer,
                listing.parking,
                listing.furnished,
                image_urls_json(&listing.image_urls)?,
                listing.owner_name,
                listing.mobile_number,
                now.timestamp_millis(),
                id,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update listing failed: {e}")))?;

    if updated == 0 {
        return Ok(None);
    }
    get_listing(conn, id)
}

/// Returns whether a row was removed.
pub fn delete_listing(conn: &Connection, id: &str) -> Result<bool, ServerError> {
    let n = conn
        .execute("delete from listings where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete listing failed: {e}")))?;
    Ok(n > 0)
}

pub fn listings_by_owner(conn: &Connection, owner_ref: i64) -> Result<Vec<Listing>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "select {LISTING_COLUMNS} from listings where owner_ref = ? order by created_at desc, id desc"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![owner_ref], listing_from_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Escape LIKE wildcards so user text matches literally (paired with `ESCAPE '\'`).
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn contains_pattern(s: &str) -> Value {
    Value::Text(format!("%{}%", escape_like(&s.to_lowercase())))
}

/// Render a `ListingQuery` to SQL plus positional parameters.
fn render_search(query: &ListingQuery) -> (String, Vec<Value>) {
    let mut clauses: Vec<&'static str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    for p in &query.predicates {
        match p {
            Predicate::TypeIs(t) => {
                clauses.push("listing_type = ?");
                values.push(Value::Text(t.as_str().to_string()));
            }
            // Both sides folded, so matching ignores case beyond ASCII.
            Predicate::NameContains(term) => {
                clauses.push("fold_case(name) like ? escape '\\'");
                values.push(contains_pattern(term));
            }
            Predicate::CityContains(city) => {
                clauses.push("fold_case(city) like ? escape '\\'");
                values.push(contains_pattern(city));
            }
            Predicate::FlagIs(flag, v) => {
                clauses.push(match flag {
                    Flag::Parking => "parking = ?",
                    Flag::Furnished => "furnished = ?",
                    Flag::Offer => "offer = ?",
                });
                values.push(Value::Integer(i64::from(*v)));
            }
        }
    }

    let column = match query.sort {
        SortKey::CreatedAt => "created_at",
        SortKey::RegularPrice => "regular_price",
    };
    let dir = match query.order {
        SortOrder::Asc => "asc",
        SortOrder::Desc => "desc",
    };

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("where {}", clauses.join(" and "))
    };

    // id breaks ties so consecutive pages never overlap.
    let sql = format!(
        "select {LISTING_COLUMNS} from listings {where_sql} order by {column} {dir}, id {dir} limit ? offset ?"
    );
    values.push(Value::Integer(i64::try_from(query.limit).unwrap_or(i64::MAX)));
    values.push(Value::Integer(i64::try_from(query.offset).unwrap_or(i64::MAX)));

    (sql, values)
}

pub fn search(conn: &Connection, query: &ListingQuery) -> Result<Vec<Listing>, ServerError> {
    let (sql, values) = render_search(query);

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(format!("prepare search failed: {e}")))?;

    let rows = stmt
        .query_map(params_from_iter(values), listing_from_row)
        .map_err(|e| ServerError::DbError(format!("search failed: {e}")))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(results)
}
