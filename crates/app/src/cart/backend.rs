//! Cart synchronization protocol against the commerce backend.
//!
//! Every mutation returns the entire cart rather than a delta: the
//! backend is authoritative for computed fields (totals, tax,
//! availability), so the client always replaces its snapshot wholesale.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    cart::{
        models::{Cart, CartId, LineId, VariantId},
        queries,
    },
    commerce::{CacheHint, CommerceClient, errors::CommerceError, models::UserError},
};

/// A line to create or add: a merchandise variant and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInput {
    pub merchandise_id: VariantId,
    pub quantity: u32,
}

/// A quantity change targeting an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineUpdate {
    pub id: LineId,
    pub quantity: u32,
}

/// Result of a cart mutation: the replacement snapshot plus any
/// business-rule validation failures.
///
/// When `user_errors` is non-empty the snapshot must not be applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayload {
    pub cart: Option<Cart>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// The five cart operations the commerce backend supports.
#[automock]
#[async_trait]
pub trait CartBackend: Send + Sync {
    /// Fetch a cart by identifier. `None` means the identifier is
    /// invalid or expired: "cart gone", not an error.
    async fn fetch_cart(&self, cart: &CartId) -> Result<Option<Cart>, CommerceError>;

    /// Create a new cart seeded with one line.
    async fn create_cart(&self, line: LineInput) -> Result<CartPayload, CommerceError>;

    /// Add a line to an existing cart. The backend may merge quantities
    /// for merchandise already present; callers must re-read the
    /// returned snapshot rather than assume either way.
    async fn add_line(&self, cart: &CartId, line: LineInput) -> Result<CartPayload, CommerceError>;

    /// Change a line's quantity. Only valid for quantities of at least
    /// one; a request for zero is a semantic remove and must be routed
    /// to [`CartBackend::remove_lines`] by the caller.
    async fn update_line(
        &self,
        cart: &CartId,
        update: LineUpdate,
    ) -> Result<CartPayload, CommerceError>;

    /// Remove the given lines from the cart.
    async fn remove_lines(
        &self,
        cart: &CartId,
        lines: &[LineId],
    ) -> Result<CartPayload, CommerceError>;
}

/// [`CartBackend`] implementation speaking the commerce backend's
/// GraphQL cart schema through the gateway.
///
/// All cart traffic carries a no-store cache hint so intermediaries
/// never serve a stale snapshot.
#[derive(Debug, Clone)]
pub struct GraphqlCartBackend {
    client: CommerceClient,
}

#[derive(Debug, Deserialize)]
struct FetchCartData {
    cart: Option<Cart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCartData {
    cart_create: Option<CartPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddCartLinesData {
    cart_lines_add: Option<CartPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCartLinesData {
    cart_lines_update: Option<CartPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveCartLinesData {
    cart_lines_remove: Option<CartPayload>,
}

impl GraphqlCartBackend {
    /// Create a backend over the given gateway.
    #[must_use]
    pub fn new(client: CommerceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartBackend for GraphqlCartBackend {
    async fn fetch_cart(&self, cart: &CartId) -> Result<Option<Cart>, CommerceError> {
        let data: FetchCartData = self
            .client
            .execute(
                &queries::FETCH_CART,
                json!({ "cartId": cart }),
                CacheHint::NoStore,
            )
            .await?;

        Ok(data.cart)
    }

    async fn create_cart(&self, line: LineInput) -> Result<CartPayload, CommerceError> {
        let data: CreateCartData = self
            .client
            .execute(
                &queries::CREATE_CART,
                json!({ "lines": [line] }),
                CacheHint::NoStore,
            )
            .await?;

        data.cart_create.ok_or(CommerceError::MissingData)
    }

    async fn add_line(&self, cart: &CartId, line: LineInput) -> Result<CartPayload, CommerceError> {
        let data: AddCartLinesData = self
            .client
            .execute(
                &queries::ADD_CART_LINES,
                json!({ "cartId": cart, "lines": [line] }),
                CacheHint::NoStore,
            )
            .await?;

        data.cart_lines_add.ok_or(CommerceError::MissingData)
    }

    async fn update_line(
        &self,
        cart: &CartId,
        update: LineUpdate,
    ) -> Result<CartPayload, CommerceError> {
        let data: UpdateCartLinesData = self
            .client
            .execute(
                &queries::UPDATE_CART_LINES,
                json!({ "cartId": cart, "lines": [update] }),
                CacheHint::NoStore,
            )
            .await?;

        data.cart_lines_update.ok_or(CommerceError::MissingData)
    }

    async fn remove_lines(
        &self,
        cart: &CartId,
        lines: &[LineId],
    ) -> Result<CartPayload, CommerceError> {
        let data: RemoveCartLinesData = self
            .client
            .execute(
                &queries::REMOVE_CART_LINES,
                json!({ "cartId": cart, "lineIds": lines }),
                CacheHint::NoStore,
            )
            .await?;

        data.cart_lines_remove.ok_or(CommerceError::MissingData)
    }
}
