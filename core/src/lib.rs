//! Client SDK for the default offers API.
//!
//! # Overview
//! Fetches OAuth bearer tokens and default card offers over mutually
//! authenticated TLS, optionally through an HTTP proxy, and classifies every
//! response into a decoded body or a typed [`Error`].
//!
//! # Design
//! - `DefaultOffersClient` owns its `Config`; there is no global state, so
//!   clients with different credentials can coexist.
//! - Resource operations are split into `build_*` (pure request building)
//!   and async calls that go through `DefaultOffersClient::invoke`.
//! - Response classification (`parse_response`) works on plain
//!   `HttpResponse` data and never touches the network.
//! - No retries, caching or pooling: one call is one request on a freshly
//!   built transport.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod response;
pub mod transport;
pub mod types;
pub mod util;
pub mod validation;

pub use client::DefaultOffersClient;
pub use config::{Authentication, Config, HttpProxy, MutualAuth};
pub use error::{Error, ErrorKind, Result};
pub use headers::HeaderParams;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::{handle_http_status_codes, parse_response, ApiResponse};
pub use transport::{ProxyTarget, TlsIdentity, TransportConfig};
pub use types::{BearerTokenResponse, DefaultOffersResponse, Offer};
pub use validation::validate_headers;
