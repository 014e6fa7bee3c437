// src/domain/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public view of an account. The password hash never leaves the db layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUp {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

/// Partial profile update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 40;

pub fn normalize_username(username: &str) -> Result<String, String> {
    let u = username.trim();
    let n = u.chars().count();
    if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&n) {
        return Err(format!(
            "username must be between {USERNAME_MIN_CHARS} and {USERNAME_MAX_CHARS} characters"
        ));
    }
    Ok(u.to_string())
}

/// Trim + lowercase, minimal sanity check.
pub fn normalize_email(email: &str) -> Result<String, String> {
    let e = email.trim().to_lowercase();
    if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
        return Err("invalid email".into());
    }
    Ok(e)
}
