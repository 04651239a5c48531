//! `localStorage`-backed token slot.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser half of [`session::TokenStorage`]. `localStorage` calls are
//! synchronous, which gives the session store its read-after-write guarantee
//! for free.

use session::{StorageError, TokenStorage};

#[cfg(not(feature = "csr"))]
const NO_BROWSER: &str = "localStorage is only available in the browser";

/// Token slot under one `localStorage` key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalStorage {
    key: String,
}

impl LocalStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(feature = "csr")]
fn browser_storage() -> Result<web_sys::Storage, StorageError> {
    let window =
        web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(StorageError::Unavailable("localStorage disabled".to_owned())),
        Err(e) => Err(StorageError::Unavailable(format!("{e:?}"))),
    }
}

impl TokenStorage for LocalStorage {
    fn read(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let storage = match browser_storage() {
                Ok(storage) => storage,
                Err(e) => {
                    log::warn!("token read failed: {e}");
                    return None;
                }
            };
            match storage.get_item(&self.key) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("token read failed: {e:?}");
                    None
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn write(&self, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            browser_storage()?
                .set_item(&self.key, value)
                .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = value;
            Err(StorageError::Unavailable(NO_BROWSER.to_owned()))
        }
    }

    fn remove(&self) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            browser_storage()?
                .remove_item(&self.key)
                .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(StorageError::Unavailable(NO_BROWSER.to_owned()))
        }
    }
}
