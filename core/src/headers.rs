//! Header construction for resource and token-issuance calls.
//!
//! Defaults come first; caller parameters are merged on top, replacing a
//! default with an identical name in place and appending anything new.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::Authentication;

/// Caller-supplied header parameters, e.g. `request_id` or `country_code`.
pub type HeaderParams = BTreeMap<String, String>;

pub const API_KEY_HEADER: &str = "X-AMEX-API-KEY";
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const CONTENT_TYPE_HEADER: &str = "content-type";

/// Headers for a resource call authenticated with the bearer token.
pub fn resource_headers(auth: &Authentication, params: &HeaderParams) -> Vec<(String, String)> {
    let defaults = vec![
        (API_KEY_HEADER.to_string(), auth.client_key.clone()),
        (AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", auth.bearer_token)),
        (CONTENT_TYPE_HEADER.to_string(), "application/json".to_string()),
    ];
    merge(defaults, params)
}

/// Headers for the token-issuance call, authenticated with basic auth over
/// the client key and secret.
pub fn token_headers(auth: &Authentication) -> Vec<(String, String)> {
    let credentials = STANDARD.encode(format!("{}:{}", auth.client_key, auth.client_secret));
    vec![
        (API_KEY_HEADER.to_string(), auth.client_key.clone()),
        (AUTHORIZATION_HEADER.to_string(), format!("Basic {credentials}")),
        (
            CONTENT_TYPE_HEADER.to_string(),
            "application/x-www-form-urlencoded".to_string(),
        ),
    ]
}

/// Shallow merge; `params` wins on identical names.
pub fn merge(mut headers: Vec<(String, String)>, params: &HeaderParams) -> Vec<(String, String)> {
    for (name, value) in params {
        match headers.iter_mut().find(|(existing, _)| existing == name) {
            Some(slot) => slot.1 = value.clone(),
            None => headers.push((name.clone(), value.clone())),
        }
    }
    headers
}
