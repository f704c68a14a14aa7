//! Error types for the storage layer.

/// Errors that can occur while reading or writing a storage slot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The key is empty or contains characters outside
    /// `[A-Za-z0-9._-]`.
    ///
    /// Keys double as file names in [`FileStorage`](crate::FileStorage),
    /// so anything that could escape the storage root is rejected for
    /// every backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The underlying filesystem operation failed.
    #[error("storage I/O failed for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The slot exists but its contents aren't UTF-8 text.
    #[error("storage slot {key:?} is not valid UTF-8: {source}")]
    InvalidData {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
