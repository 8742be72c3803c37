//! Transport setup: URL resolution, mutual TLS and proxying.
//!
//! # Design
//! A `TransportConfig` is derived from the client's `Config` at the start of
//! every call and consumed by a single `build_http_client` call, which applies
//! the TLS identity and the proxy to the same `reqwest::Client`. Nothing is
//! cached between calls.

use std::time::Duration;

use tracing::warn;

use crate::config::Config;
use crate::error::{Error, Result};

/// PEM material presented to the server during the TLS handshake.
#[derive(Clone, PartialEq, Eq)]
pub struct TlsIdentity {
    pub private_key: Vec<u8>,
    pub certificate: Vec<u8>,
}

impl std::fmt::Debug for TlsIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsIdentity").finish_non_exhaustive()
    }
}

/// Proxy all requests through `host:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    pub host: String,
    pub port: String,
}

impl ProxyTarget {
    /// Proxy URL; a bare host is treated as a plain HTTP proxy.
    pub fn url(&self) -> String {
        if self.host.contains("://") {
            format!("{}:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportConfig {
    pub identity: Option<TlsIdentity>,
    pub proxy: Option<ProxyTarget>,
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    pub fn from_config(config: &Config) -> Self {
        let identity = config.mutual_auth.as_ref().map(|auth| TlsIdentity {
            private_key: auth.private_key.clone(),
            certificate: auth.public_cert.clone(),
        });
        let proxy = config
            .http_proxy
            .as_ref()
            .filter(|proxy| proxy.is_enabled)
            .map(|proxy| ProxyTarget {
                host: proxy.host.clone(),
                port: proxy.port.clone(),
            });
        Self {
            identity,
            proxy,
            timeout: config.timeout,
        }
    }
}

/// Build the one client used for a single call.
pub fn build_http_client(transport: &TransportConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();

    if let Some(identity) = &transport.identity {
        let mut pem = identity.certificate.clone();
        if !pem.ends_with(b"\n") {
            pem.push(b'\n');
        }
        pem.extend_from_slice(&identity.private_key);
        let identity = reqwest::Identity::from_pem(&pem)
            .map_err(|e| Error::Api(format!("invalid client certificate or key: {e}")))?;
        builder = builder.identity(identity);
    }

    if let Some(proxy) = &transport.proxy {
        let proxy = reqwest::Proxy::all(proxy.url())
            .map_err(|e| Error::Api(format!("invalid proxy {}: {e}", proxy.url())))?;
        builder = builder.proxy(proxy);
    }

    if let Some(timeout) = transport.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| Error::Api(format!("failed to create HTTP client: {e}")))
}

/// Join the root URL and a request path. A root without an explicit
/// `https` or `http://` scheme gets `https://` prepended.
pub fn resolve_url(root_url: &str, path: &str) -> String {
    if root_url.starts_with("https") {
        format!("{root_url}{path}")
    } else if root_url.starts_with("http://") {
        warn!(root_url, "plain HTTP root URL: credentials are sent unencrypted and no client certificate is presented");
        format!("{root_url}{path}")
    } else {
        format!("https://{root_url}{path}")
    }
}
