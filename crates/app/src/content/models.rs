//! Content models: blog articles and static pages.

use jiff::Timestamp;
use serde::Deserialize;

/// An image served by the content backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alt: Option<String>,
}

/// Rendered body HTML with an optional teaser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Body {
    /// Sanitized HTML, ready to render.
    pub processed: String,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct CreatedAt {
    pub timestamp: i64,
}

/// A blog article.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    /// Site-relative path, e.g. `/blog/hello-world`.
    pub path: String,
    pub(crate) created: CreatedAt,
    pub body: Body,
    #[serde(default)]
    pub featured_image: Option<ContentImage>,
}

impl Article {
    /// Publication time, when the backend timestamp is representable.
    #[must_use]
    pub fn created_at(&self) -> Option<Timestamp> {
        Timestamp::from_second(self.created.timestamp).ok()
    }
}

/// A static page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    pub path: String,
    pub body: Body,
    #[serde(default)]
    pub hero_image: Option<ContentImage>,
}
