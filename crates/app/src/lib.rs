//! Storefront client core.
//!
//! Composes two upstream headless services, a commerce backend (catalog
//! and cart) and a content backend (articles and pages), behind typed
//! clients, and owns the one genuinely stateful piece in between: the
//! client-side cart store with its persisted identity.

pub mod cart;
pub mod catalog;
pub mod commerce;
pub mod config;
pub mod content;

mod graphql;
mod ids;

pub use ids::TypedId;
