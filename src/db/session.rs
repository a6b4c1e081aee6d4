//! The signed-in user, kept under its own storage key.

use super::storage::{keys, LocalStorage};
use crate::models::User;

/// Holds the single current-user record.
#[derive(Clone)]
pub struct Session {
    storage: LocalStorage,
}

impl Session {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub async fn get_current_user(&self) -> Option<User> {
        self.storage.read_record(keys::CURRENT_USER).await
    }

    /// Store `user` as the current user. `None` deletes the key.
    pub async fn set_current_user(&self, user: Option<&User>) {
        match user {
            Some(user) => self.storage.write_record(keys::CURRENT_USER, user).await,
            None => self.storage.clear_record(keys::CURRENT_USER).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_storage;
    use crate::models::Role;

    #[tokio::test]
    async fn test_logout_clears_key() {
        let (storage, _dir) = temp_storage().await;
        let session = Session::new(storage.clone());
        let user = User::new("jane@student.edu", Role::Student).unwrap();

        assert_eq!(session.get_current_user().await, None);

        session.set_current_user(Some(&user)).await;
        assert_eq!(session.get_current_user().await, Some(user));

        session.set_current_user(None).await;
        assert_eq!(session.get_current_user().await, None);
        assert_eq!(storage.get_item(keys::CURRENT_USER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_session_reads_absent() {
        let (storage, _dir) = temp_storage().await;
        storage.set_item(keys::CURRENT_USER, "null-ish").await.unwrap();
        let session = Session::new(storage);
        assert_eq!(session.get_current_user().await, None);
    }
}
