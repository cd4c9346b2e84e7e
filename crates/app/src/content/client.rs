//! Content API client.

use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

use crate::{
    content::{
        errors::ContentError,
        models::{Article, Page},
        queries,
        token::TokenCache,
    },
    graphql::Envelope,
};

/// HTTP client for the content backend's GraphQL endpoint.
///
/// Public content is served without a token; when the token cache
/// produces a bearer token it is attached for authenticated reads.
#[derive(Debug)]
pub struct ContentClient {
    http: Client,
    endpoint: String,
    tokens: Arc<TokenCache>,
}

#[derive(Debug, Deserialize)]
struct NodeList<T> {
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticlesData {
    node_articles: Option<NodeList<Article>>,
}

#[derive(Debug, Deserialize)]
struct RouteData {
    route: Option<RouteEntity>,
}

#[derive(Debug, Deserialize)]
struct RouteEntity {
    entity: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PathNode {
    path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticlePathsData {
    node_articles: Option<NodeList<PathNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PagePathsData {
    node_pages: Option<NodeList<PathNode>>,
}

impl ContentClient {
    /// Create a client for `{base_url}/graphql` using the given token
    /// cache.
    #[must_use]
    pub fn new(base_url: &str, tokens: Arc<TokenCache>) -> Self {
        Self {
            http: Client::new(),
            endpoint: format!("{base_url}/graphql"),
            tokens,
        }
    }

    /// List the most recent articles.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unusable body.
    pub async fn articles(&self, first: u32) -> Result<Vec<Article>, ContentError> {
        let data: ArticlesData = self
            .execute(queries::ARTICLES, serde_json::json!({ "first": first }))
            .await?;

        Ok(data.node_articles.map(|list| list.nodes).unwrap_or_default())
    }

    /// Resolve an article by its site path; `None` when the path does
    /// not lead to an article.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unusable body.
    pub async fn article_by_path(&self, path: &str) -> Result<Option<Article>, ContentError> {
        let data: RouteData = self
            .execute(queries::ARTICLE_BY_PATH, serde_json::json!({ "path": path }))
            .await?;

        Ok(decode_entity(data))
    }

    /// Resolve a static page by its site path; `None` when the path
    /// does not lead to a page.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unusable body.
    pub async fn page_by_path(&self, path: &str) -> Result<Option<Page>, ContentError> {
        let data: RouteData = self
            .execute(queries::PAGE_BY_PATH, serde_json::json!({ "path": path }))
            .await?;

        Ok(decode_entity(data))
    }

    /// All article paths, for sitemap-style enumeration.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unusable body.
    pub async fn article_paths(&self) -> Result<Vec<String>, ContentError> {
        let data: ArticlePathsData = self
            .execute(queries::ARTICLE_PATHS, Value::Null)
            .await?;

        Ok(paths(data.node_articles))
    }

    /// All page paths, for sitemap-style enumeration.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unusable body.
    pub async fn page_paths(&self) -> Result<Vec<String>, ContentError> {
        let data: PagePathsData = self.execute(queries::PAGE_PATHS, Value::Null).await?;

        Ok(paths(data.node_pages))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<T, ContentError> {
        let body = serde_json::json!({
            "query": document,
            "variables": variables,
        });

        let mut request = self.http.post(&self.endpoint).json(&body);

        if let Some(token) = self.tokens.bearer().await {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Transport {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let envelope: Envelope<T> = response.json().await?;

        if let Some(errors) = &envelope.errors {
            for error in errors {
                warn!(message = %error.message, "content api returned a protocol error");
            }
        }

        envelope.data.ok_or(ContentError::MissingData)
    }
}

/// A route that resolves to a different node type selects no fields, so
/// the entity arrives as an empty object; treat anything that does not
/// decode as absent.
fn decode_entity<T: DeserializeOwned>(data: RouteData) -> Option<T> {
    let entity = data.route?.entity?;

    serde_json::from_value(entity).ok()
}

fn paths(list: Option<NodeList<PathNode>>) -> Vec<String> {
    list.map(|list| list.nodes.into_iter().map(|node| node.path).collect())
        .unwrap_or_default()
}
