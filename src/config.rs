// src/config.rs
use std::env;
use std::net::SocketAddr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

/// Credentials for the transactional mail relay. Absent = welcome mails off.
#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
}

/// Unsigned-upload settings for the image CDN. Absent = uploads disabled.
#[derive(Clone, Debug)]
pub struct CdnConfig {
    pub upload_url: String,
    pub upload_preset: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_path: String,
    pub max_workers: usize,
    pub session_ttl_secs: i64,
    pub public_base_url: String,
    pub mail: Option<MailConfig>,
    pub cdn: Option<CdnConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_path: "estate.sqlite3".to_string(),
            max_workers: 8,
            session_ttl_secs: 60 * 60 * 24 * 7,
            public_base_url: "http://127.0.0.1:3000".to_string(),
            mail: None,
            cdn: None,
        }
    }
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(v) => parse_var("BIND_ADDR", v)?,
            None => defaults.bind_addr,
        };
        let max_workers = match get("MAX_WORKERS") {
            Some(v) => parse_var("MAX_WORKERS", v)?,
            None => defaults.max_workers,
        };
        let session_ttl_secs = match get("SESSION_TTL_SECS") {
            Some(v) => parse_var("SESSION_TTL_SECS", v)?,
            None => defaults.session_ttl_secs,
        };

        let mail = get("BREVO_API_KEY").map(|api_key| MailConfig {
            api_key,
            sender_email: get("MAIL_SENDER_EMAIL")
                .unwrap_or_else(|| "no-reply@example.com".to_string()),
            sender_name: get("MAIL_SENDER_NAME").unwrap_or_else(|| "Estate Search".to_string()),
        });

        let cdn = match (get("CDN_UPLOAD_URL"), get("CDN_UPLOAD_PRESET")) {
            (Some(upload_url), Some(upload_preset)) => Some(CdnConfig {
                upload_url,
                upload_preset,
            }),
            _ => None,
        };

        Ok(Self {
            bind_addr,
            database_path: get("DATABASE_PATH").unwrap_or(defaults.database_path),
            max_workers,
            session_ttl_secs,
            public_base_url: get("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            mail,
            cdn,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
