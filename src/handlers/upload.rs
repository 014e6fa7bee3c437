use astra::Request;
use serde_json::json;

use crate::auth::sessions::require_user;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{content_type, now_secs, parse_query, read_body};
use crate::media::{check_image, UploadError, MAX_IMAGE_BYTES};
use crate::responses::json_response;
use crate::state::AppState;

impl From<UploadError> for ServerError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::TooLarge => ServerError::PayloadTooLarge,
            UploadError::UnsupportedType(_) | UploadError::Empty => {
                ServerError::BadRequest(e.to_string())
            }
            UploadError::RequestFailed(_) | UploadError::Rejected(_) => {
                ServerError::Upstream(e.to_string())
            }
        }
    }
}

/// `POST /api/upload`: raw image bytes in the body, `?filename=` optional.
pub fn upload(mut req: Request, state: &AppState) -> ResultResp {
    let user_id = require_user(&req, &state.db, now_secs())?;
    let host = state
        .images
        .as_deref()
        .ok_or_else(|| ServerError::Upstream("image uploads are not configured".into()))?;

    let ctype = content_type(&req).unwrap_or_default().to_string();
    let filename = parse_query(&req)
        .remove("filename")
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| "upload".to_string());

    let bytes = read_body(&mut req, MAX_IMAGE_BYTES)?;
    check_image(&bytes, &ctype)?;

    let url = host.upload(bytes, &filename, &ctype)?;
    log::info!("user {user_id} uploaded {filename} -> {url}");
    json_response(201, &json!({ "url": url }))
}
