//! Client for the default offers and token-issuance endpoints.
//!
//! # Design
//! `DefaultOffersClient` owns its `Config`; constructing one is the
//! configure step and validates it. Each resource operation is split into a
//! `build_*` method that produces an `HttpRequest` with no I/O, and an async
//! method that passes that request to `invoke`.
//!
//! `invoke` builds a fresh transport for every call from the current config,
//! performs exactly one request, and hands the captured response to
//! `parse_response`. Updating the bearer token takes `&mut self`, so it can
//! never race an in-flight call on the same client.

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::headers::{resource_headers, token_headers, HeaderParams};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::{parse_response, ApiResponse};
use crate::transport::{build_http_client, resolve_url, TransportConfig};
use crate::types::BearerTokenResponse;
use crate::util::append_parameters;
use crate::validation::validate_headers;

pub const DEFAULT_OFFERS_PATH: &str = "/acquisition/digital/v1/offers/cards/default_offers";
pub const BEARER_TOKEN_PATH: &str = "/apiplatform/v1/oauth/token_provisioning/bearer_tokens";
pub const BEARER_TOKEN_BODY: &str = "grant_type=client_credentials&scope=default";

#[derive(Debug, Clone)]
pub struct DefaultOffersClient {
    config: Config,
}

impl DefaultOffersClient {
    /// Validate `config` and take ownership of it.
    pub fn new(config: Config) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Store the token sent as `Authorization: Bearer` on resource calls.
    pub fn set_bearer_token(&mut self, token: impl Into<String>) {
        self.config.authentication.bearer_token = token.into();
    }

    /// Request for the default offers attached to the external entry point
    /// `eep`. Fails before any I/O if a required header parameter is missing.
    pub fn build_default_offers(&self, eep: &str, params: &HeaderParams) -> Result<HttpRequest> {
        let errors = validate_headers(params);
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: append_parameters(DEFAULT_OFFERS_PATH, &[("eep", eep)]),
            headers: resource_headers(&self.config.authentication, params),
            body: None,
        })
    }

    pub fn build_bearer_token(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: BEARER_TOKEN_PATH.to_string(),
            headers: token_headers(&self.config.authentication),
            body: Some(BEARER_TOKEN_BODY.to_string()),
        }
    }

    pub async fn get_default_offers(&self, eep: &str, params: &HeaderParams) -> Result<ApiResponse> {
        let request = self.build_default_offers(eep, params)?;
        self.invoke(request).await
    }

    pub async fn get_bearer_token(&self) -> Result<ApiResponse> {
        self.invoke(self.build_bearer_token()).await
    }

    /// Fetch a bearer token and store it for subsequent resource calls.
    pub async fn authenticate(&mut self) -> Result<BearerTokenResponse> {
        let token: BearerTokenResponse = self.get_bearer_token().await?.deserialize()?;
        self.set_bearer_token(token.access_token.clone());
        Ok(token)
    }

    /// Send `request` to the configured root URL and classify the response.
    ///
    /// Transport failures of any kind come back as `Error::Api` carrying the
    /// underlying description.
    pub async fn invoke(&self, request: HttpRequest) -> Result<ApiResponse> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;

        let url = resolve_url(&self.config.root_url, &path);
        let client = build_http_client(&TransportConfig::from_config(&self.config))?;
        let verb = reqwest::Method::from_bytes(method.as_str().as_bytes())
            .map_err(|e| Error::Api(format!("invalid HTTP method {method}: {e}")))?;

        let mut builder = client.request(verb, &url);
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        debug!(%method, %url, "sending request");
        let response = builder.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "request failed");
            Error::Api(e.to_string())
        })?;

        let response = capture(response).await?;
        debug!(
            status = ?response.status,
            content_type = response.header("content-type").unwrap_or(""),
            "received response"
        );
        parse_response(response)
    }
}

/// Read a live response into plain data.
async fn capture(response: reqwest::Response) -> Result<HttpResponse> {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response.text().await.map_err(|e| {
        warn!(status, error = %e, "failed to read response body");
        Error::Api(e.to_string())
    })?;
    Ok(HttpResponse {
        status: Some(status),
        headers,
        body,
    })
}
