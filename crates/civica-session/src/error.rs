//! Error types for the session layer.

use civica_storage::StorageError;

/// Errors that can occur while authenticating or loading a session.
///
/// None of these are fatal to the application. `InvalidCredentials` is
/// the answer to a failed login, and `CorruptSession` is recovered by
/// discarding the stored record; in both cases the guardian simply stays
/// logged out.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The username/password pair was rejected by the
    /// [`Authenticator`](crate::Authenticator).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The persisted session couldn't be parsed or failed validation
    /// (wrong shape, unknown access level, unparseable timestamp, ...).
    #[error("corrupt session data: {0}")]
    CorruptSession(String),

    /// Serializing a session for storage failed.
    #[error("failed to encode session: {0}")]
    Encode(serde_json::Error),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
