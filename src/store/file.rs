//! File-backed cart store.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::store::{CartSnapshot, CartStore, SNAPSHOT_VERSION, StoreError};

/// A [`CartStore`] backed by a single JSON file, the durable per-browser
/// key/value slot of the original client. Last write wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the storage slot.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for FileStore {
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(snapshot).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(StoreError::Unavailable)?;
            }
        }

        fs::write(&self.path, bytes).map_err(StoreError::Unavailable)
    }

    fn load(&self) -> Result<Option<CartSnapshot>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Unavailable(err)),
        };

        match serde_json::from_slice::<CartSnapshot>(&bytes) {
            Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => Ok(Some(snapshot)),
            Ok(snapshot) => {
                warn!(
                    version = snapshot.version,
                    "unsupported cart snapshot version, starting empty"
                );

                Ok(None)
            }
            Err(error) => {
                warn!(%error, "stored cart snapshot is unreadable, starting empty");

                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Unavailable(err)),
        }
    }
}
