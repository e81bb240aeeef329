//! Key-Value Store Port - durable per-origin storage for serialized blobs.
//!
//! The cart persists its whole line list as one JSON string under a fixed
//! key. Reads and writes are synchronous so cart operations apply in call
//! order with no suspension point.

/// Errors that can occur during key-value storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Port for reading and writing string values under string keys
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// `None` if nothing is stored under the key
    ///
    /// # Errors
    /// Returns `StorageError` if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns `StorageError` if the write fails
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`; absent keys are not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
