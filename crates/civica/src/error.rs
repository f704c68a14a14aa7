//! Unified error type for the CIVICA portal.

use civica_session::SessionError;
use civica_storage::StorageError;

/// Top-level error that wraps the crate-specific errors.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum CivicaError {
    /// A storage-level error (bad key, I/O).
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A session-level error (credentials, corrupt record).
    #[error(transparent)]
    Session(#[from] SessionError),
}
