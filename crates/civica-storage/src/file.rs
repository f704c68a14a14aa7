//! Filesystem storage: one file per slot.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{validate_key, Storage, StorageError};

/// A [`Storage`] that keeps each slot in `<root>/<key>.json`.
///
/// Writes go to `<key>.json.tmp` first and are renamed into place, so a
/// reader never sees a half-written value. A crash between the two steps
/// leaves at most a stale `.tmp` file, which the next write replaces.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Opens (and creates, if needed) a storage directory.
    ///
    /// # Errors
    /// Returns [`StorageError::Io`] if the directory can't be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            key: root.display().to_string(),
            source,
        })?;
        tracing::debug!(root = %root.display(), "file storage opened");
        Ok(Self { root })
    }

    /// Returns the directory holding the slot files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file a key is stored in.
    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match fs::read(self.path_for(key)) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|source| StorageError::InvalidData {
                    key: key.to_string(),
                    source,
                }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(io_error(key, source)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|source| io_error(key, source))?;
        fs::rename(&tmp, &path).map_err(|source| io_error(key, source))?;

        tracing::debug!(key, bytes = value.len(), "slot written");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {
                tracing::debug!(key, "slot removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(io_error(key, source)),
        }
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}
