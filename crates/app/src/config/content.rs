//! Content backend configuration.

use clap::Args;

use crate::content::token::ClientSecret;

/// Connection and credential settings for the content backend.
///
/// The GraphQL endpoint serves public content without a token; the
/// OAuth client credentials are only needed for authenticated reads,
/// and the token cache skips refreshing when they are absent.
#[derive(Debug, Clone, Args)]
pub struct ContentConfig {
    /// Content backend base URL, e.g. `https://cms.example.com`.
    #[arg(long, env = "CONTENT_BASE_URL")]
    pub base_url: Option<String>,

    /// OAuth client identifier for the client-credentials exchange.
    #[arg(long, env = "CONTENT_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret for the client-credentials exchange.
    #[arg(long, env = "CONTENT_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<ClientSecret>,
}

impl ContentConfig {
    /// Whether the base URL and both OAuth credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.client_id.is_some() && self.client_secret.is_some()
    }

    /// Whether the OAuth credentials are present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}
