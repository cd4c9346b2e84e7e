//! Catalog fetch paths: products and collections.

pub mod models;
pub mod service;

mod queries;

pub use models::{Collection, PriceRange, Product, ProductOption, ProductVariant};
pub use service::CatalogService;
