//! Cart models as returned by the commerce backend.
//!
//! Every field the backend computes (totals, tax, checkout URL) is taken
//! verbatim from the latest snapshot; nothing here is derived locally.

use serde::Deserialize;

use crate::{
    commerce::models::{Image, Money, SelectedOption},
    graphql::nodes_from_edges,
    ids::TypedId,
};

/// Marker for [`CartId`].
#[derive(Debug)]
pub struct CartTag;

/// Marker for [`LineId`].
#[derive(Debug)]
pub struct LineTag;

/// Marker for [`VariantId`].
#[derive(Debug)]
pub struct VariantTag;

/// Backend-assigned cart identifier; only ever accepted from a
/// successful create response, never generated locally.
pub type CartId = TypedId<CartTag>;

/// Backend-assigned cart line identifier, stable for the line's life.
pub type LineId = TypedId<LineTag>;

/// Identifier of a purchasable merchandise variant.
pub type VariantId = TypedId<VariantTag>;

/// One shopper's pending order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,

    /// Hosted-checkout URL. May change across backend calls; always use
    /// the latest value.
    pub checkout_url: Option<String>,

    /// Sum of all line quantities, recomputed by the backend on every
    /// mutation.
    pub total_quantity: u32,

    pub cost: CartCost,

    /// Backend-defined order; unchanged until a mutation changes it.
    #[serde(deserialize_with = "nodes_from_edges")]
    pub lines: Vec<CartLine>,
}

/// Backend-computed cart totals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    pub subtotal_amount: Money,
    pub total_amount: Money,
    pub total_tax_amount: Option<Money>,
}

/// One merchandise selection with a quantity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartLine {
    pub id: LineId,
    pub quantity: u32,
    pub merchandise: Merchandise,
}

/// Display snapshot of the selected variant, captured at query time and
/// not guaranteed fresh.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchandise {
    pub id: VariantId,
    pub title: String,
    pub product: MerchandiseProduct,
    pub price: Money,
    pub selected_options: Vec<SelectedOption>,
}

/// Product-level display fields for a cart line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseProduct {
    pub title: String,
    pub handle: String,
    pub featured_image: Option<Image>,
}
