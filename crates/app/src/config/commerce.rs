//! Commerce backend configuration.

use clap::Args;

use crate::commerce::CommerceEndpoint;

/// Connection settings for the commerce backend.
#[derive(Debug, Clone, Args)]
pub struct CommerceConfig {
    /// Commerce store domain, e.g. `my-store.example.com`.
    #[arg(long, env = "COMMERCE_STORE_DOMAIN")]
    pub store_domain: Option<String>,

    /// Public storefront access token for catalog and cart operations.
    #[arg(long, env = "COMMERCE_STOREFRONT_TOKEN")]
    pub storefront_token: Option<String>,

    /// API version segment of the GraphQL endpoint path.
    #[arg(long, env = "COMMERCE_API_VERSION", default_value = "2024-01")]
    pub api_version: String,
}

impl CommerceConfig {
    /// Whether both the domain and the storefront token are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.store_domain.is_some() && self.storefront_token.is_some()
    }

    /// Gateway endpoint configuration, when fully configured.
    #[must_use]
    pub fn endpoint(&self) -> Option<CommerceEndpoint> {
        let domain = self.store_domain.as_ref()?;
        let token = self.storefront_token.as_ref()?;

        Some(CommerceEndpoint {
            endpoint: format!("https://{domain}/api/{}/graphql.json", self.api_version),
            storefront_token: token.clone(),
        })
    }
}
