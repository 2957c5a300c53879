//! Local key-value storage abstraction.
//!
//! The browser build of the app keeps flags such as `app_version` in
//! `localStorage`; this trait is the same contract for any host.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The backing medium could not be read
    #[error("Failed to read storage: {0}")]
    ReadFailed(String),
    /// The backing medium could not be written
    #[error("Failed to write storage: {0}")]
    WriteFailed(String),
    /// Stored data is not in the expected format
    #[error("Storage is corrupted: {0}")]
    Corrupted(String),
}

/// Synchronous string key-value storage.
///
/// Values are plain strings; callers serialize whatever they need.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
