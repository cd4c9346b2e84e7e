//! Durable storage for the active cart identifier.
//!
//! A single `cart_id` slot scoped to the client context. The stored
//! value always comes from a successful create response, and storage is
//! the single source of truth for which cart to rehydrate at startup.

use std::{
    fs, io,
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use mockall::automock;
use thiserror::Error;

use crate::cart::models::CartId;

/// Errors raised by the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying key-value store failed.
    #[error("cart identifier storage failed")]
    Io(#[from] io::Error),
}

/// Key-value slot holding at most one cart identifier.
#[automock]
pub trait CartIdStore: Send + Sync {
    /// Read the stored identifier, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying store cannot be read.
    fn load(&self) -> Result<Option<CartId>, StorageError>;

    /// Replace the stored identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying store cannot be written.
    fn store(&self, cart: &CartId) -> Result<(), StorageError>;

    /// Forget the stored identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying store cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory store for tests and ephemeral contexts.
#[derive(Debug, Default)]
pub struct MemoryCartIdStore {
    slot: Mutex<Option<CartId>>,
}

impl MemoryCartIdStore {
    fn slot(&self) -> std::sync::MutexGuard<'_, Option<CartId>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartIdStore for MemoryCartIdStore {
    fn load(&self) -> Result<Option<CartId>, StorageError> {
        Ok(self.slot().clone())
    }

    fn store(&self, cart: &CartId) -> Result<(), StorageError> {
        *self.slot() = Some(cart.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot() = None;
        Ok(())
    }
}

/// File-backed store: one identifier in one file.
#[derive(Debug, Clone)]
pub struct FileCartIdStore {
    path: PathBuf,
}

impl FileCartIdStore {
    /// Create a store persisting to the given file path.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CartIdStore for FileCartIdStore {
    fn load(&self) -> Result<Option<CartId>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let id = contents.trim();

                if id.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(CartId::new(id)))
                }
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn store(&self, cart: &CartId) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, cart.as_str())?;

        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
