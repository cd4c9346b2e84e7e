//! Commerce backend gateway and shared value types.

pub mod client;
pub mod errors;
pub mod models;

pub use client::{CacheHint, CommerceClient, CommerceEndpoint};
pub use errors::CommerceError;
pub use models::{Image, Money, SelectedOption, UserError};
