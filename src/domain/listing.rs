// src/domain/listing.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const NAME_MIN_CHARS: usize = 10;
pub const NAME_MAX_CHARS: usize = 62;
pub const ROOMS_MIN: i64 = 1;
pub const ROOMS_MAX: i64 = 10;
pub const PRICE_MIN: f64 = 50.0;
pub const PRICE_MAX: f64 = 10_000_000.0;
pub const MAX_IMAGES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Sale,
    Rent,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Sale => "sale",
            ListingType::Rent => "rent",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(ListingType::Sale),
            "rent" => Ok(ListingType::Rent),
            other => Err(format!("unknown listing type `{other}`")),
        }
    }
}

/// A stored property listing, as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub regular_price: f64,
    pub discount_price: f64,
    pub offer: bool,
    pub parking: bool,
    pub furnished: bool,
    pub image_urls: Vec<String>,
    pub owner_name: Option<String>,
    pub mobile_number: Option<String>,
    pub owner_ref: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn cover_url(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Price a buyer actually pays: the discount when an offer is running.
    pub fn effective_price(&self) -> f64 {
        if self.offer {
            self.discount_price
        } else {
            self.regular_price
        }
    }
}

/// Create/update payload. Field names match the JSON the listing form posts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub regular_price: f64,
    #[serde(default)]
    pub discount_price: f64,
    #[serde(default)]
    pub offer: bool,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub furnished: bool,
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
}

impl NewListing {
    /// Trim text fields and check every listing invariant.
    /// Out-of-range values are rejected, never clamped.
    pub fn validated(mut self) -> Result<Self, String> {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.address = self.address.trim().to_string();
        self.city = self.city.trim().to_string();
        self.owner_name = trimmed_opt(self.owner_name);
        self.mobile_number = trimmed_opt(self.mobile_number);

        let name_len = self.name.chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_len) {
            return Err(format!(
                "name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
            ));
        }
        if self.description.is_empty() {
            return Err("description is required".into());
        }
        if self.address.is_empty() {
            return Err("address is required".into());
        }
        if self.city.is_empty() {
            return Err("city is required".into());
        }
        for (label, n) in [("bedrooms", self.bedrooms), ("bathrooms", self.bathrooms)] {
            if !(ROOMS_MIN..=ROOMS_MAX).contains(&n) {
                return Err(format!("{label} must be between {ROOMS_MIN} and {ROOMS_MAX}"));
            }
        }
        if !self.regular_price.is_finite() || !(PRICE_MIN..=PRICE_MAX).contains(&self.regular_price)
        {
            return Err(format!(
                "regularPrice must be between {PRICE_MIN} and {PRICE_MAX}"
            ));
        }
        if !self.discount_price.is_finite() || self.discount_price < 0.0 {
            return Err("discountPrice must be a non-negative number".into());
        }
        if self.offer && self.discount_price > self.regular_price {
            return Err("discountPrice must not exceed regularPrice".into());
        }

        self.image_urls = self
            .image_urls
            .into_iter()
            .map(|u| u.trim().to_string())
            .collect();
        if self.image_urls.is_empty() {
            return Err("at least one image is required".into());
        }
        if self.image_urls.len() > MAX_IMAGES {
            return Err(format!("at most {MAX_IMAGES} images are allowed"));
        }
        for raw in &self.image_urls {
            let parsed = url::Url::parse(raw).map_err(|_| format!("invalid image url `{raw}`"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!("image url must be http(s): `{raw}`"));
            }
        }

        Ok(self)
    }
}

fn trimmed_opt(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
