//! Catalog service over the commerce gateway.

use serde::Deserialize;
use serde_json::json;

use crate::{
    catalog::{
        models::{Collection, Product},
        queries,
    },
    commerce::{CacheHint, CommerceClient, errors::CommerceError},
    graphql::nodes_from_edges,
};

/// Read-only catalog queries. Stateless; catalog responses are happy to
/// be cached by intermediaries.
#[derive(Debug, Clone)]
pub struct CatalogService {
    client: CommerceClient,
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    #[serde(deserialize_with = "nodes_from_edges")]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct ProductByHandleData {
    product: Option<Product>,
}

#[derive(Debug, Deserialize)]
struct CollectionsData {
    #[serde(deserialize_with = "nodes_from_edges")]
    collections: Vec<Collection>,
}

#[derive(Debug, Deserialize)]
struct CollectionByHandleData {
    collection: Option<Collection>,
}

impl CatalogService {
    /// Create a service over the given gateway.
    #[must_use]
    pub fn new(client: CommerceClient) -> Self {
        Self { client }
    }

    /// List products, best sellers first.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unusable body.
    pub async fn products(&self, first: u32) -> Result<Vec<Product>, CommerceError> {
        let data: ProductsData = self
            .client
            .execute(
                &queries::PRODUCTS,
                json!({ "first": first }),
                CacheHint::Default,
            )
            .await?;

        Ok(data.products)
    }

    /// Fetch one product by handle; `None` when the handle is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unusable body.
    pub async fn product_by_handle(&self, handle: &str) -> Result<Option<Product>, CommerceError> {
        let data: ProductByHandleData = self
            .client
            .execute(
                &queries::PRODUCT_BY_HANDLE,
                json!({ "handle": handle }),
                CacheHint::Default,
            )
            .await?;

        Ok(data.product)
    }

    /// List collections.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unusable body.
    pub async fn collections(&self, first: u32) -> Result<Vec<Collection>, CommerceError> {
        let data: CollectionsData = self
            .client
            .execute(
                &queries::COLLECTIONS,
                json!({ "first": first }),
                CacheHint::Default,
            )
            .await?;

        Ok(data.collections)
    }

    /// Fetch one collection with its products; `None` when the handle
    /// is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unusable body.
    pub async fn collection_by_handle(
        &self,
        handle: &str,
        first: u32,
    ) -> Result<Option<Collection>, CommerceError> {
        let data: CollectionByHandleData = self
            .client
            .execute(
                &queries::COLLECTION_BY_HANDLE,
                json!({ "handle": handle, "first": first }),
                CacheHint::Default,
            )
            .await?;

        Ok(data.collection)
    }
}
