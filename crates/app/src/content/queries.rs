//! GraphQL documents for the content backend.

pub(crate) const ARTICLES: &str = include_str!("graphql/articles.graphql");
pub(crate) const ARTICLE_BY_PATH: &str = include_str!("graphql/article_by_path.graphql");
pub(crate) const ARTICLE_PATHS: &str = include_str!("graphql/article_paths.graphql");
pub(crate) const PAGE_BY_PATH: &str = include_str!("graphql/page_by_path.graphql");
pub(crate) const PAGE_PATHS: &str = include_str!("graphql/page_paths.graphql");
