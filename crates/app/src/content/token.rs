//! OAuth client-credentials token cache for the content backend.
//!
//! An explicit, injectable cache object constructed once per process:
//! no module-level mutable state, and the source behind it can be
//! swapped out in tests.

use std::{
    convert::Infallible,
    fmt::{Debug, Formatter, Result as FmtResult},
    str::FromStr,
    sync::Arc,
};

use async_trait::async_trait;
use jiff::{Span, Timestamp};
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::warn;
use zeroize::Zeroize;

use crate::content::errors::ContentError;

/// Refresh this many seconds before the token actually expires.
const REFRESH_MARGIN_SECONDS: i64 = 60;

/// An OAuth client secret. Redacted in debug output and zeroized on
/// drop.
#[derive(Clone)]
pub struct ClientSecret(String);

impl ClientSecret {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for ClientSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("ClientSecret(**redacted**)")
    }
}

impl Drop for ClientSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl FromStr for ClientSecret {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self(value.to_string()))
    }
}

/// A freshly issued bearer token and its advertised lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuedToken {
    /// The bearer token value.
    pub access_token: String,
    /// Advertised lifetime in seconds.
    pub expires_in: i64,
}

/// Something that can perform the token exchange.
#[automock]
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Exchange credentials for a fresh token.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    async fn fetch_token(&self) -> Result<IssuedToken, ContentError>;
}

/// [`TokenSource`] performing the OAuth client-credentials exchange
/// against the content backend's token endpoint.
#[derive(Debug, Clone)]
pub struct OauthTokenSource {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: ClientSecret,
}

impl OauthTokenSource {
    /// Create a source posting to `{base_url}/oauth/token`.
    #[must_use]
    pub fn new(base_url: &str, client_id: String, client_secret: ClientSecret) -> Self {
        Self {
            http: Client::new(),
            token_url: format!("{base_url}/oauth/token"),
            client_id,
            client_secret,
        }
    }
}

#[async_trait]
impl TokenSource for OauthTokenSource {
    async fn fetch_token(&self) -> Result<IssuedToken, ContentError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", &self.client_id),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Transport {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

struct CachedToken {
    token: String,
    expires_at: Timestamp,
}

/// Bearer-token cache, constructed once per process and refreshed in
/// place for its whole lifetime.
pub struct TokenCache {
    source: Option<Arc<dyn TokenSource>>,
    state: Mutex<Option<CachedToken>>,
}

impl Debug for TokenCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TokenCache")
            .field("configured", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

impl TokenCache {
    /// Create a cache over the given source; `None` means credentials
    /// are absent and every [`TokenCache::bearer`] call answers `None`.
    #[must_use]
    pub fn new(source: Option<Arc<dyn TokenSource>>) -> Self {
        Self {
            source,
            state: Mutex::new(None),
        }
    }

    /// A cache that never produces a token.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    /// Current bearer token, refreshing when within the margin of
    /// expiry. `None` when credentials are absent or the exchange
    /// failed; failures are logged, not raised, because public content
    /// remains readable without a token.
    pub async fn bearer(&self) -> Option<String> {
        let source = self.source.as_ref()?;

        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref() {
            if Timestamp::now() < cached.expires_at {
                return Some(cached.token.clone());
            }
        }

        match source.fetch_token().await {
            Ok(issued) => {
                if let Some(expires_at) = expiry_from(issued.expires_in) {
                    *state = Some(CachedToken {
                        token: issued.access_token.clone(),
                        expires_at,
                    });
                }

                Some(issued.access_token)
            }
            Err(error) => {
                warn!(%error, "oauth token exchange failed");
                None
            }
        }
    }
}

fn expiry_from(expires_in: i64) -> Option<Timestamp> {
    let lifetime = expires_in.saturating_sub(REFRESH_MARGIN_SECONDS);
    let span = Span::new().try_seconds(lifetime).ok()?;

    Timestamp::now().checked_add(span).ok()
}
