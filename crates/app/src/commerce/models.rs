//! Value types shared across commerce responses.

use std::str::FromStr;

use rust_decimal::Decimal;
use rusty_money::iso;
use serde::Deserialize;

/// A backend-computed amount in a specific currency.
///
/// The amount stays a decimal string: tax and discount rules are opaque
/// to the client, so it never does money arithmetic of its own.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as issued by the backend, e.g. `"12.50"`.
    pub amount: String,
    /// ISO 4217 currency code, e.g. `"USD"`.
    pub currency_code: String,
}

impl Money {
    /// Parse the backend amount into a [`Decimal`].
    ///
    /// # Errors
    ///
    /// Returns an error when the backend amount is not a decimal string.
    pub fn decimal(&self) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(&self.amount)
    }

    /// Format for display, e.g. `"$12.50"`.
    ///
    /// Falls back to `"{amount} {code}"` when the currency code is
    /// unknown or the amount does not parse.
    #[must_use]
    pub fn format(&self) -> String {
        let formatted = iso::find(&self.currency_code)
            .zip(self.decimal().ok())
            .map(|(currency, amount)| rusty_money::Money::from_decimal(amount, currency).to_string());

        formatted.unwrap_or_else(|| format!("{} {}", self.amount, self.currency_code))
    }
}

/// An image reference with its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// One selected option value on a variant, e.g. `Size: M`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// A business-rule validation failure returned alongside HTTP 200.
///
/// Requires corrective action from the shopper (e.g. pick a smaller
/// quantity), unlike transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserError {
    /// Input path the error refers to, when the backend names one.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Human-readable message for the shopper.
    pub message: String,
}
