//! Persistence slot for the session token.
//!
//! Implementations are synchronous. Once `remove` returns, the next `read` on
//! the same thread must observe the removal.

use std::cell::RefCell;

use crate::error::StorageError;

/// A single-key store holding the raw token string.
pub trait TokenStorage {
    /// Read the stored value. Backend failures read as absent.
    fn read(&self) -> Option<String>;

    /// Overwrite the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend refuses the write.
    fn write(&self, value: &str) -> Result<(), StorageError>;

    /// Remove the stored value. Removing an absent value succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend refuses the removal.
    fn remove(&self) -> Result<(), StorageError>;
}

/// In-process storage; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: RefCell<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that starts out holding `value`.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(value.into())),
        }
    }
}

impl TokenStorage for MemoryStorage {
    fn read(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn write(&self, value: &str) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(value.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}
