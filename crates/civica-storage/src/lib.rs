//! Persistent key/value slots for CIVICA 144.
//!
//! The guardian keeps its session in a single named slot, the same way a
//! browser app keeps it in `localStorage`. This crate provides the
//! [`Storage`] trait that abstracts over where those slots live:
//!
//! - [`MemoryStorage`]: a shared in-process map. Used by tests and by
//!   anything that doesn't need to survive a restart.
//! - [`FileStorage`]: one JSON file per slot under a root directory.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session Layer (above)  ← reads/writes the serialized session
//!     ↕
//! Storage Layer (this crate)  ← opaque string values keyed by name
//! ```
//!
//! Values are opaque strings. The storage layer never looks inside them;
//! validating what comes back is the caller's job.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A store of named string slots.
///
/// All methods take `&self`: backends that need mutation use interior
/// mutability, so a handle can be shared with whoever needs to inspect
/// the slots (tests, a second view onto the same directory).
///
/// # Example
///
/// ```rust
/// use civica_storage::{MemoryStorage, Storage};
///
/// let storage = MemoryStorage::new();
/// storage.set_item("theme", "dusk").unwrap();
/// assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dusk"));
///
/// storage.remove_item("theme").unwrap();
/// assert_eq!(storage.get_item("theme").unwrap(), None);
/// ```
pub trait Storage: Send + Sync + 'static {
    /// Returns the value stored under `key`, or `None` if the slot is
    /// empty.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Empties the slot. Removing a key that holds nothing is not an
    /// error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Rejects keys that are empty or contain anything outside
/// `[A-Za-z0-9._-]`, and the special names `.` and `..`.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if key.is_empty() || key == "." || key == ".." || !key.chars().all(allowed) {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_session_key() {
        assert!(validate_key("guardian-session").is_ok());
        assert!(validate_key("civica_144.v2").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_empty() {
        assert!(matches!(
            validate_key(""),
            Err(StorageError::InvalidKey(k)) if k.is_empty()
        ));
    }

    #[test]
    fn test_validate_key_rejects_path_components() {
        for key in ["../escape", "a/b", "a\\b", ".", "..", "with space"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
