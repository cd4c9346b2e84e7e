//! GraphQL documents for the catalog operations.

use std::sync::LazyLock;

const PRODUCT_FRAGMENT: &str = include_str!("graphql/product_fragment.graphql");

fn with_product_fragment(operation: &str) -> String {
    format!("{PRODUCT_FRAGMENT}\n{operation}")
}

pub(crate) static PRODUCTS: LazyLock<String> =
    LazyLock::new(|| with_product_fragment(include_str!("graphql/products.graphql")));

pub(crate) static PRODUCT_BY_HANDLE: LazyLock<String> =
    LazyLock::new(|| with_product_fragment(include_str!("graphql/product_by_handle.graphql")));

pub(crate) static COLLECTION_BY_HANDLE: LazyLock<String> =
    LazyLock::new(|| with_product_fragment(include_str!("graphql/collection_by_handle.graphql")));

pub(crate) static COLLECTIONS: LazyLock<String> =
    LazyLock::new(|| include_str!("graphql/collections.graphql").to_string());
