//! Content backend client: articles, pages, and OAuth token caching.

pub mod client;
pub mod errors;
pub mod models;
pub mod token;

mod queries;

pub use client::ContentClient;
pub use errors::ContentError;
pub use models::{Article, Body, ContentImage, Page};
pub use token::{ClientSecret, OauthTokenSource, TokenCache, TokenSource};
