//! Catalog models as returned by the commerce backend.

use serde::Deserialize;

use crate::{
    cart::models::VariantId,
    commerce::models::{Image, Money, SelectedOption},
    graphql::nodes_from_edges,
};

/// A purchasable product with its variants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    /// URL-safe identifier used in storefront routes.
    pub handle: String,
    pub title: String,
    pub description: String,
    pub description_html: String,
    pub available_for_sale: bool,
    pub vendor: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub featured_image: Option<Image>,
    #[serde(default, deserialize_with = "nodes_from_edges")]
    pub images: Vec<Image>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default, deserialize_with = "nodes_from_edges")]
    pub variants: Vec<ProductVariant>,
    pub price_range: PriceRange,
}

/// A specific purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: VariantId,
    pub title: String,
    pub available_for_sale: bool,
    pub quantity_available: Option<i32>,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    pub image: Option<Image>,
}

/// One configurable axis of a product, e.g. Size.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductOption {
    pub id: String,
    pub name: String,
    pub values: Vec<String>,
}

/// Cheapest and dearest variant prices.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: Money,
    pub max_variant_price: Money,
}

/// A curated set of products.
///
/// Collection listings omit the product connection entirely; it only
/// arrives on a by-handle fetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub image: Option<Image>,
    #[serde(default, deserialize_with = "nodes_from_edges")]
    pub products: Vec<Product>,
}
