//! Durable credential storage.
//!
//! [`KeyValueStore`] is the seam to the persistent backend (an in-memory
//! map here, a JSON file in `ingeniia-store`). [`TokenStore`] sits on top
//! and is the only thing the rest of the toolkit talks to.

mod memory;
mod token_store;

use crate::error::StorageError;

pub use memory::MemoryStore;
pub use token_store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStore};

/// A string-keyed persistent key-value area.
///
/// Implementations are synchronous: token lookups happen on every request
/// and never touch the network.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Apply several writes together. `None` deletes the key.
    ///
    /// The default applies them one by one; backends that can commit a
    /// batch atomically should override it.
    fn write_batch(&self, entries: &[(&str, Option<&str>)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            match value {
                Some(value) => self.set(key, value)?,
                None => self.remove(key)?,
            }
        }
        Ok(())
    }
}
