//! Content client errors.

use thiserror::Error;

/// Errors raised while talking to the content backend.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The endpoint answered with a non-2xx HTTP status.
    #[error("content api request failed with status {status} {status_text}")]
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
    #[error("content api response carried no data")]
    MissingData,
}
