//! Token and offers lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the client over real
//! HTTP: authenticate, fetch offers, and hit each error path the API
//! documents. The root URL carries an explicit `http://` scheme so no TLS is
//! involved.

use default_offers::{
    ApiResponse, Config, DefaultOffersClient, DefaultOffersResponse, ErrorKind, HeaderParams,
    HttpMethod, HttpRequest,
};
use tokio::net::TcpListener;

async fn start_mock_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_server::run(listener).await });
    format!("http://{addr}")
}

fn params() -> HeaderParams {
    HeaderParams::from([
        ("request_id".to_string(), "uuid_request_id".to_string()),
        ("client_id".to_string(), "ASDFSD334235DDD".to_string()),
        ("message_type_id".to_string(), "5101".to_string()),
        ("country_code".to_string(), "US".to_string()),
    ])
}

#[tokio::test]
async fn token_and_offers_lifecycle() {
    let root = start_mock_server().await;
    let mut client = DefaultOffersClient::new(Config::new(&root, "key", "secret")).unwrap();

    // Step 1: offers without a token are rejected.
    let err = client.get_default_offers("defaultoffer", &params()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.message(), r#"{"message":"invalid bearer token"}"#);

    // Step 2: fetch and store a token.
    let token = client.authenticate().await.unwrap();
    assert_eq!(token.access_token, "SGgKpuAG1DLMQPwYCG2AqZUPVdTL");
    assert_eq!(
        client.config().authentication.bearer_token,
        "SGgKpuAG1DLMQPwYCG2AqZUPVdTL"
    );

    // Step 3: offers for the known entry point.
    let offers: DefaultOffersResponse = client
        .get_default_offers("defaultoffer", &params())
        .await
        .unwrap()
        .deserialize()
        .unwrap();
    assert_eq!(offers.offers.len(), 1);
    assert_eq!(offers.offers[0].acquisition_offer_id, "ABCD12345");
    assert_eq!(offers.offers[0].rewards[0].value, 100);

    // Step 4: unknown entry point is not found.
    let err = client.get_default_offers("missing", &params()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    assert_eq!(err.message(), r#"{"message":"no offers for eep"}"#);

    // Step 5: empty eep reaches the API and comes back as 400.
    let err = client.get_default_offers("", &params()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestValidation);
    assert!(err.fields().is_empty());
}

#[tokio::test]
async fn wrong_secret_is_authentication_error() {
    let root = start_mock_server().await;
    let client = DefaultOffersClient::new(Config::new(&root, "key", "wrong")).unwrap();

    let err = client.get_bearer_token().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.message(), r#"{"message":"invalid client credentials"}"#);
}

#[tokio::test]
async fn stub_responses_are_classified() {
    let root = start_mock_server().await;
    let client = DefaultOffersClient::new(Config::new(&root, "key", "secret")).unwrap();
    let call = |query: &str| HttpRequest {
        method: HttpMethod::Post,
        path: format!("/stub?{query}"),
        headers: Vec::new(),
        body: Some("{}".to_string()),
    };

    let result = client
        .invoke(call("status=200&content_type=text/html&body=hello"))
        .await
        .unwrap();
    assert_eq!(result, ApiResponse::Text("hello".to_string()));

    let result = client.invoke(call("status=204")).await.unwrap();
    assert_eq!(result, ApiResponse::NoContent);

    let err = client
        .invoke(call("status=200&content_type=text/plain&body=hello"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "Invalid response from API");

    let err = client
        .invoke(call("status=500&content_type=text/html&body=boom"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "boom");
}

#[tokio::test]
async fn unreachable_host_is_api_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        DefaultOffersClient::new(Config::new(&format!("http://{addr}"), "key", "secret")).unwrap();
    let err = client.get_bearer_token().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert!(!err.message().is_empty());
}
