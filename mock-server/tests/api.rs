use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, TokenResponse, OFFERS_PATH, TOKEN_PATH};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

// base64("key:secret")
const BASIC: &str = "Basic a2V5OnNlY3JldA==";
const BEARER: &str = "Bearer SGgKpuAG1DLMQPwYCG2AqZUPVdTL";

fn token_request(authorization: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(TOKEN_PATH)
        .header("X-AMEX-API-KEY", "key")
        .header(header::AUTHORIZATION, authorization)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("grant_type=client_credentials&scope=default".to_string())
        .unwrap()
}

fn offers_request(query: &str, authorization: &str) -> Request<String> {
    Request::builder()
        .uri(format!("{OFFERS_PATH}{query}"))
        .header("X-AMEX-API-KEY", "key")
        .header(header::AUTHORIZATION, authorization)
        .header("request_id", "uuid_request_id")
        .header("client_id", "ASDFSD334235DDD")
        .header("country_code", "US")
        .header("message_type_id", "5101")
        .body(String::new())
        .unwrap()
}

// --- token ---

#[tokio::test]
async fn token_issued_for_valid_credentials() {
    let resp = app().oneshot(token_request(BASIC)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    let token: TokenResponse = body_json(resp).await;
    assert_eq!(token.access_token, "SGgKpuAG1DLMQPwYCG2AqZUPVdTL");
    assert_eq!(token.status, "approved");
}

#[tokio::test]
async fn token_rejected_for_wrong_secret() {
    let resp = app().oneshot(token_request("Basic bm9wZTpub3Bl")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "invalid client credentials");
}

// --- offers ---

#[tokio::test]
async fn offers_returned_for_known_eep() {
    let resp = app()
        .oneshot(offers_request("?eep=defaultoffer", BEARER))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["offers"][0]["product_type"], "LENDING");
    assert_eq!(body["refresh_interval"], "14400000");
}

#[tokio::test]
async fn offers_unknown_eep_is_404() {
    let resp = app()
        .oneshot(offers_request("?eep=other", BEARER))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn offers_missing_eep_is_400() {
    let resp = app().oneshot(offers_request("", BEARER)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn offers_wrong_token_is_401() {
    let resp = app()
        .oneshot(offers_request("?eep=defaultoffer", "Bearer expired"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn offers_missing_header_is_400() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri(format!("{OFFERS_PATH}?eep=defaultoffer"))
                .header(header::AUTHORIZATION, BEARER)
                .header("request_id", "r")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(
        body["message"],
        "missing headers: client_id, country_code, message_type_id"
    );
}

// --- stub ---

#[tokio::test]
async fn stub_echoes_status_type_and_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/stub?status=503&content_type=text/html&body=down")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/html");
    assert_eq!(body_bytes(resp).await, "down");
}

#[tokio::test]
async fn stub_defaults_to_empty_200() {
    let resp = app()
        .oneshot(Request::builder().uri("/stub").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::CONTENT_TYPE).is_none());
    assert!(body_bytes(resp).await.is_empty());
}
