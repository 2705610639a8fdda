// responses/json.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;

/// Serialize `value` into a JSON response. The API is open to any
/// origin, so a local map page can be served from elsewhere too.
pub fn json_response<T: Serialize>(value: &T) -> ResultResp {
    let body = serde_json::to_string(value).map_err(|_| ServerError::InternalError)?;

    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)?;

    Ok(resp)
}

/// JSON error body for `/api/*` routes.
pub fn json_error_response(status: u16, message: &str) -> ResultResp {
    let body = serde_json::json!({ "error": message }).to_string();

    let resp = ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)?;

    Ok(resp)
}
