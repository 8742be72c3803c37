//! Response decoding and status classification.
//!
//! # Design
//! Classification runs in two steps over a captured `HttpResponse`:
//!
//! 1. `decode_body` picks a decoder from the `content-type` header. Only the
//!    literal values `application/json`, `application/json;charset=utf-8` and
//!    `text/html` are recognised; parameters and spacing are not normalised.
//!    Any other type is accepted only for an empty 2xx response.
//! 2. `handle_http_status_codes` turns the decoded body into a result or a
//!    typed error according to the status code.
//!
//! Both are pure so they can be exercised without a server.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result, INVALID_RESPONSE};
use crate::http::HttpResponse;

/// Successful outcome of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Body decoded from a JSON content type.
    Json(Value),
    /// Body read as text from a `text/html` content type.
    Text(String),
    /// 2xx with no body and an unrecognised content type.
    NoContent,
}

impl ApiResponse {
    /// The decoded JSON value, if the body was JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Deserialize a JSON result into `T`. Text and empty results fail with
    /// `Error::Api`.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            ApiResponse::Json(value) => serde_json::from_value(value)
                .map_err(|e| Error::Api(format!("unexpected response shape: {e}"))),
            other => Err(Error::Api(format!(
                "expected a JSON response, got {}",
                other.error_message()
            ))),
        }
    }

    /// Text used as the message when this body accompanies an error status:
    /// JSON is re-serialised compactly, except a bare JSON string which is
    /// used as is.
    pub fn error_message(&self) -> String {
        match self {
            ApiResponse::Json(Value::String(text)) => text.clone(),
            ApiResponse::Json(value) => value.to_string(),
            ApiResponse::Text(text) => text.clone(),
            ApiResponse::NoContent => "true".to_string(),
        }
    }
}

/// Decode, then classify.
pub fn parse_response(response: HttpResponse) -> Result<ApiResponse> {
    let status = response.status;
    let body = decode_body(response)?;
    handle_http_status_codes(body, status)
}

/// Decode the body according to the response's `content-type`.
pub fn decode_body(response: HttpResponse) -> Result<ApiResponse> {
    let content_type = response.header("content-type").map(str::to_owned);
    match content_type.as_deref() {
        Some("application/json") | Some("application/json;charset=utf-8") => {
            serde_json::from_str(&response.body)
                .map(ApiResponse::Json)
                .map_err(|e| Error::Api(format!("invalid JSON in response body: {e}")))
        }
        Some("text/html") => Ok(ApiResponse::Text(response.body)),
        _ => {
            if is_success(response.status) && declares_no_content(&response) {
                Ok(ApiResponse::NoContent)
            } else {
                Err(Error::Api(INVALID_RESPONSE.to_string()))
            }
        }
    }
}

/// Map a decoded body and status onto a result or a typed error.
/// A missing status is not a success.
pub fn handle_http_status_codes(body: ApiResponse, status: Option<u16>) -> Result<ApiResponse> {
    match status {
        Some(200..=299) => Ok(body),
        Some(404) => Err(Error::ResourceNotFound(body.error_message())),
        Some(400) => Err(Error::RequestValidation {
            message: body.error_message(),
            fields: Vec::new(),
        }),
        Some(401) => Err(Error::Authentication(body.error_message())),
        _ => Err(Error::Api(body.error_message())),
    }
}

fn is_success(status: Option<u16>) -> bool {
    matches!(status, Some(200..=299))
}

/// An absent `content-length` counts as zero; an unparseable one does not.
fn declares_no_content(response: &HttpResponse) -> bool {
    match response.header("content-length") {
        None => true,
        Some(raw) => raw.trim().parse::<i64>().is_ok_and(|length| length <= 0),
    }
}
