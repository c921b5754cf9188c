//! Persisted session user.

use quickmart_core::User;
use tokio::sync::Mutex;

use super::load_or_default;
use crate::storage::{DeviceStorage, StorageError, StorageKey};

/// The signed-in user, mirrored to the `user` storage key.
///
/// Unlike the other stores, writes here report failures: a sign-in that was
/// not persisted is not treated as a sign-in.
#[derive(Debug)]
pub struct SessionStore {
    user: Mutex<Option<User>>,
    storage: DeviceStorage,
}

impl SessionStore {
    pub async fn load(storage: DeviceStorage) -> Self {
        let user: Option<User> = load_or_default(&storage, StorageKey::User).await;
        if let Some(user) = &user {
            tracing::info!(user_id = %user.id, "Restored session");
        }
        Self {
            user: Mutex::new(user),
            storage,
        }
    }

    pub async fn current(&self) -> Option<User> {
        self.user.lock().await.clone()
    }

    /// Persist `user` as the session user, then make it current.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails; the previous session is
    /// kept.
    pub async fn set(&self, user: User) -> Result<User, StorageError> {
        let mut current = self.user.lock().await;
        self.storage.save(StorageKey::User, &user).await?;
        *current = Some(user.clone());
        Ok(user)
    }

    /// Remove the stored user, then clear the session.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the key cannot be removed.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let mut current = self.user.lock().await;
        self.storage.remove(StorageKey::User).await?;
        *current = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quickmart_core::{Email, UserId};

    use super::*;

    fn user() -> User {
        User {
            id: UserId::new("123456"),
            name: "John Doe".to_string(),
            email: Email::parse("john@example.com").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_session_survives_reload() {
        let storage = DeviceStorage::memory();
        let store = SessionStore::load(storage.clone()).await;
        store.set(user()).await.unwrap();

        let reloaded = SessionStore::load(storage.clone()).await;
        assert_eq!(reloaded.current().await, Some(user()));

        reloaded.clear().await.unwrap();
        assert!(reloaded.current().await.is_none());
        assert!(storage.get_raw(StorageKey::User).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "").unwrap();
        let store = SessionStore::load(DeviceStorage::file(&blocker)).await;

        assert!(store.set(user()).await.is_err());
        assert!(store.current().await.is_none());
    }
}
