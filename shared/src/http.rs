//! HTTP helpers for the function binaries.

use lambda_http::{Body, Response};
use serde::Serialize;

use crate::{Error, Result};

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>> {
    let body = serde_json::to_string(data)?;
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .map_err(|e| Error::Internal(format!("failed to build response: {e}")))
}

/// Create an error response carrying `{"error": message}`.
pub fn error_response(status: u16, message: impl AsRef<str>) -> Result<Response<Body>> {
    json_response(status, &ErrorBody {
        error: message.as_ref(),
    })
}
