use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use serde::Serialize;

pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|e| {
        log::error!("failed to serialize response: {e}");
        ServerError::InternalError
    })?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// JSON response that also sets (or clears) a cookie.
pub fn json_response_with_cookie<T: Serialize>(
    status: u16,
    value: &T,
    set_cookie: &str,
) -> ResultResp {
    let mut resp = json_response(status, value)?;
    let header = set_cookie
        .parse()
        .map_err(|_| ServerError::InternalError)?;
    resp.headers_mut().insert("Set-Cookie", header);
    Ok(resp)
}
