//! Presence checks for the header parameters a default offers call needs.

use crate::headers::HeaderParams;
use crate::util::is_blank;

/// Header parameters every default offers request must carry, with the
/// message reported when each is absent.
const REQUIRED_HEADERS: [(&str, &str); 4] = [
    ("request_id", "request id is missing in headers"),
    ("client_id", "client id is missing in headers"),
    ("country_code", "country code is missing in headers"),
    ("message_type_id", "message type id is missing in headers"),
];

/// Return one message per problem with `params`, in a fixed order: the
/// record being empty, then each required key that is missing or empty.
/// An empty list means the parameters are valid.
pub fn validate_headers(params: &HeaderParams) -> Vec<String> {
    let mut errors = Vec::new();
    if params.is_empty() {
        errors.push("headers is empty".to_string());
    }
    for (key, message) in REQUIRED_HEADERS {
        if params.get(key).is_none_or(|value| is_blank(value)) {
            errors.push(message.to_string());
        }
    }
    errors
}
