//! Client-side cart: models, sync protocol, store, and persisted identity.

pub mod backend;
pub mod models;
pub mod persistence;
pub mod store;

mod queries;

pub use backend::{CartBackend, CartPayload, GraphqlCartBackend, LineInput, LineUpdate};
pub use models::{Cart, CartCost, CartId, CartLine, LineId, Merchandise, VariantId};
pub use persistence::{CartIdStore, FileCartIdStore, MemoryCartIdStore, StorageError};
pub use store::{CartState, CartStore, MutationOutcome};
