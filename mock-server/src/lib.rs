use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

pub const TOKEN_PATH: &str = "/apiplatform/v1/oauth/token_provisioning/bearer_tokens";
pub const OFFERS_PATH: &str = "/acquisition/digital/v1/offers/cards/default_offers";

/// Credentials the mock accepts and the token it hands out.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub client_key: String,
    pub client_secret: String,
    pub access_token: String,
    /// The only external entry point with offers attached.
    pub eep: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            client_key: "key".to_string(),
            client_secret: "secret".to_string(),
            access_token: "SGgKpuAG1DLMQPwYCG2AqZUPVdTL".to_string(),
            eep: "defaultoffer".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub scope: String,
    pub status: String,
    pub expires_in: String,
    pub token_type: String,
    pub access_token: String,
}

#[derive(Deserialize)]
pub struct OffersQuery {
    pub eep: Option<String>,
}

/// Canned response for `/stub`; every field is optional.
#[derive(Deserialize)]
pub struct StubQuery {
    pub status: Option<u16>,
    pub content_type: Option<String>,
    pub body: Option<String>,
}

type Shared = Arc<MockConfig>;

const REQUIRED_HEADERS: [&str; 4] = ["request_id", "client_id", "country_code", "message_type_id"];

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    Router::new()
        .route(TOKEN_PATH, post(issue_token))
        .route(OFFERS_PATH, get(default_offers))
        .route("/stub", any(stub))
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn issue_token(State(config): State<Shared>, headers: HeaderMap) -> Response {
    let expected_basic = format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", config.client_key, config.client_secret))
    );
    if header_value(&headers, "x-amex-api-key") != Some(config.client_key.as_str())
        || header_value(&headers, "authorization") != Some(expected_basic.as_str())
    {
        return error(StatusCode::UNAUTHORIZED, "invalid client credentials");
    }
    Json(TokenResponse {
        scope: "default".to_string(),
        status: "approved".to_string(),
        expires_in: "3599".to_string(),
        token_type: "BearerToken".to_string(),
        access_token: config.access_token.clone(),
    })
    .into_response()
}

async fn default_offers(
    State(config): State<Shared>,
    Query(query): Query<OffersQuery>,
    headers: HeaderMap,
) -> Response {
    let expected_bearer = format!("Bearer {}", config.access_token);
    if header_value(&headers, "authorization") != Some(expected_bearer.as_str()) {
        return error(StatusCode::UNAUTHORIZED, "invalid bearer token");
    }
    let missing: Vec<&str> = REQUIRED_HEADERS
        .into_iter()
        .filter(|name| header_value(&headers, name).is_none_or(str::is_empty))
        .collect();
    if !missing.is_empty() {
        return error(
            StatusCode::BAD_REQUEST,
            &format!("missing headers: {}", missing.join(", ")),
        );
    }
    match query.eep.filter(|eep| !eep.is_empty()) {
        None => error(StatusCode::BAD_REQUEST, "eep is required"),
        Some(eep) if eep != config.eep => error(StatusCode::NOT_FOUND, "no offers for eep"),
        Some(_) => Json(sample_offers()).into_response(),
    }
}

async fn stub(Query(query): Query<StubQuery>) -> Response {
    let status = query
        .status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);
    let mut response = Response::new(Body::from(query.body.unwrap_or_default()));
    *response.status_mut() = status;
    if let Some(content_type) = query.content_type {
        if let Ok(value) = content_type.parse() {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
    }
    response
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// One lending offer, shaped like the production payload.
pub fn sample_offers() -> serde_json::Value {
    json!({
        "offers": [{
            "acquisition_offer_id": "ABCD12345",
            "product_name": "Example American Express Card",
            "product_type": "LENDING",
            "rewards": [{ "currency": "USD", "value": 100 }],
            "urls": [
                { "name": "APPLY_URL", "value": "example.com" },
                { "name": "TERMS_AND_CONDITIONS_URL", "value": "example.com" },
                { "name": "CARD_ART_URL", "value": "example.com" }
            ],
            "fees": [
                {
                    "name": "ANNUAL_FEE",
                    "type": "FIXED",
                    "value": "$0",
                    "currency": "USD",
                    "display_text": "Marketing Annual fee text"
                }
            ],
            "content_groups": [{
                "name": "MARKETING_OFFER_TEXT",
                "contents": [{
                    "sequence_order": 1,
                    "title": "Special Offer",
                    "display_text": [{ "text": "Marketing Offer Text" }]
                }]
            }]
        }],
        "refresh_interval": "14400000"
    })
}
