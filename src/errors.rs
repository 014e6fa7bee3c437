use astra::Response;

/// Errors originating from either the server logic
/// (routing, validation, missing resources) or downstream layers
/// (database, CDN, mail relay).
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Database unavailable: {0}")]
    DbError(String),

    #[error("Upstream service failed: {0}")]
    Upstream(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn invalid_param(name: &'static str, reason: impl Into<String>) -> Self {
        ServerError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_)
            | ServerError::InvalidParameter { .. }
            | ServerError::Validation(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::Forbidden(_) => 403,
            ServerError::Conflict(_) => 409,
            ServerError::PayloadTooLarge => 413,
            ServerError::DbError(_) => 503,
            ServerError::Upstream(_) => 502,
            ServerError::InternalError => 500,
        }
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
