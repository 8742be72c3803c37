//! Response DTOs for the token and default offers endpoints.
//!
//! # Design
//! Calls return an untyped `ApiResponse`; these types are an opt-in view via
//! `ApiResponse::deserialize`. Fields the API may omit are `Option` or
//! default to empty so a sparse offer still deserializes.

use serde::{Deserialize, Serialize};

/// Body of a successful token-issuance call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Seconds until expiry; the API sends it as a string.
    #[serde(default)]
    pub expires_in: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultOffersResponse {
    #[serde(default)]
    pub offers: Vec<Offer>,
    /// Milliseconds the caller may cache the offers for.
    #[serde(default)]
    pub refresh_interval: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub acquisition_offer_id: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub urls: Vec<NamedValue>,
    #[serde(default)]
    pub fees: Vec<Fee>,
    #[serde(default)]
    pub content_groups: Vec<ContentGroup>,
}

impl Offer {
    /// Value of the URL entry called `name`, e.g. `APPLY_URL`.
    pub fn url(&self, name: &str) -> Option<&str> {
        self.urls
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub currency: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub name: String,
    #[serde(rename = "type", default)]
    pub fee_type: Option<String>,
    pub value: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub display_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentGroup {
    pub name: String,
    #[serde(default)]
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub sequence_order: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub display_text: Vec<DisplayText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayText {
    pub text: String,
}
