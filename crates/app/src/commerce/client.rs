//! Commerce API gateway.
//!
//! A thin typed request function over the commerce backend's GraphQL
//! endpoint. Stateless across calls; the only per-call knob is a cache
//! freshness hint passed through to the transport layer.

use reqwest::{Client, header::CACHE_CONTROL};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::{commerce::errors::CommerceError, graphql::Envelope};

/// Request header carrying the public storefront credential.
pub const STOREFRONT_TOKEN_HEADER: &str = "X-Storefront-Access-Token";

/// Where and as whom the gateway talks to the commerce backend.
#[derive(Debug, Clone)]
pub struct CommerceEndpoint {
    /// Full GraphQL endpoint URL,
    /// e.g. `https://shop.example.com/api/2024-01/graphql.json`.
    pub endpoint: String,

    /// Public, read/write-scoped storefront access token.
    pub storefront_token: String,
}

/// Freshness hint forwarded to the transport layer.
///
/// Never correctness-relevant: cart traffic asks for `NoStore` so
/// intermediaries don't serve a stale snapshot, catalog traffic is
/// content to be cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheHint {
    /// Let the transport and intermediaries apply their defaults.
    #[default]
    Default,
    /// Ask intermediaries not to cache the response.
    NoStore,
}

/// HTTP client for the commerce backend's GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct CommerceClient {
    config: CommerceEndpoint,
    http: Client,
}

impl CommerceClient {
    /// Create a new gateway from the given endpoint configuration.
    #[must_use]
    pub fn new(config: CommerceEndpoint) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Execute one GraphQL operation and decode its `data` object.
    ///
    /// Top-level GraphQL protocol errors are logged but do not fail the
    /// call as long as `data` is present; callers must treat fields of
    /// `T` as possibly null.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::Transport`] on a non-2xx status,
    /// [`CommerceError::Http`] on network or decode failure, and
    /// [`CommerceError::MissingData`] when the body carries no `data`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
        cache: CacheHint,
    ) -> Result<T, CommerceError> {
        let body = serde_json::json!({
            "query": document,
            "variables": variables,
        });

        let mut request = self
            .http
            .post(&self.config.endpoint)
            .header(STOREFRONT_TOKEN_HEADER, &self.config.storefront_token)
            .json(&body);

        if cache == CacheHint::NoStore {
            request = request.header(CACHE_CONTROL, "no-store");
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommerceError::Transport {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let envelope: Envelope<T> = response.json().await?;

        if let Some(errors) = &envelope.errors {
            for error in errors {
                warn!(message = %error.message, "commerce api returned a protocol error");
            }
        }

        envelope.data.ok_or(CommerceError::MissingData)
    }
}
