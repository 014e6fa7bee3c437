use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// API paths get JSON errors, everything else an HTML page.
pub fn error_response(path: &str, err: ServerError) -> Response {
    if path.starts_with("/api/") {
        json_error_response(err)
    } else {
        html_error_response(err)
    }
}

fn log_error(err: &ServerError) {
    match err.status() {
        500.. => log::error!("{err}"),
        _ => log::debug!("{err}"),
    }
}

/// Error body shaped like `{success: false, statusCode, message}`.
pub fn json_error_response(err: ServerError) -> Response {
    log_error(&err);
    let status = err.status();
    let body = json!({
        "success": false,
        "statusCode": status,
        "message": err.to_string(),
    });

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

pub fn html_error_response(err: ServerError) -> Response {
    log_error(&err);
    let status = err.status();
    let page = error_page(status, &err.to_string());

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
