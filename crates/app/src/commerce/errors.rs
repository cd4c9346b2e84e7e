//! Commerce gateway errors.

use thiserror::Error;

/// Errors raised while talking to the commerce backend.
///
/// Business-rule validation failures are not errors at this level; they
/// arrive as `userErrors` inside a successful payload and are handled by
/// the cart store.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// The endpoint answered with a non-2xx HTTP status.
    #[error("commerce api request failed with status {status} {status_text}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
    },

    /// Network failure or undecodable response body.
    #[error("http error")]
    Http(#[from] reqwest::Error),

    /// A 200 response whose body carried no usable `data` object.
    #[error("commerce api response carried no data")]
    MissingData,
}
