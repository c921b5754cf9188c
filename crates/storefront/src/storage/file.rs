//! File-backed device storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{StorageError, StorageKey};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a hidden temp file in the same directory and are renamed over
/// the target, so a reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub(super) async fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }

    pub(super) async fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        let io = |source| StorageError::Io { key, source };

        tokio::fs::create_dir_all(&self.dir).await.map_err(io)?;

        let target = self.path_for(key);
        let temp = self.dir.join(format!(".{key}.json.tmp"));
        tokio::fs::write(&temp, value).await.map_err(io)?;
        tokio::fs::rename(&temp, &target).await.map_err(io)?;

        tracing::debug!(key = %key, path = %target.display(), "Wrote device storage");
        Ok(())
    }

    pub(super) async fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::DeviceStorage;
    use super::*;

    #[tokio::test]
    async fn test_value_lands_in_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DeviceStorage::file(dir.path().join("device"));

        storage.set_raw(StorageKey::Theme, "\"dark\"").await.unwrap();

        let on_disk = std::fs::read_to_string(dir.path().join("device/theme.json")).unwrap();
        assert_eq!(on_disk, "\"dark\"");
        assert!(!dir.path().join("device/.theme.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DeviceStorage::file(dir.path());
        assert!(storage.get_raw(StorageKey::Cart).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DeviceStorage::file(dir.path());

        storage.set_raw(StorageKey::Cart, "[]").await.unwrap();
        storage.set_raw(StorageKey::Cart, "[1]").await.unwrap();
        assert_eq!(
            storage.get_raw(StorageKey::Cart).await.unwrap().as_deref(),
            Some("[1]")
        );

        storage.remove(StorageKey::Cart).await.unwrap();
        storage.remove(StorageKey::Cart).await.unwrap();
        assert!(storage.get_raw(StorageKey::Cart).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unwritable_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "not a directory").unwrap();
        let storage = DeviceStorage::file(&blocker);

        let result = storage.set_raw(StorageKey::User, "{}").await;
        assert!(matches!(
            result,
            Err(StorageError::Io {
                key: StorageKey::User,
                ..
            })
        ));
    }
}
