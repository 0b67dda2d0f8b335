//! Mutex-guarded vector of users kept in insertion order.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{RecordStoreError, UserRecordStore};
use crate::domain::{User, UserId, Username};

/// Process-local [`UserRecordStore`].
///
/// The lock is held for one store call only, so a read-modify-save sequence
/// can interleave with other requests; the last save wins.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::ports::UserRecordStore;
/// use exercise_tracker::domain::{User, Username};
/// use exercise_tracker::outbound::memory::InMemoryUserRecordStore;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let store = InMemoryUserRecordStore::default();
/// let user = User::register(Username::new("alice").expect("valid username"));
/// store.create(&user).await.expect("stored");
/// assert_eq!(store.find_all().await.expect("listed").len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRecordStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRecordStore {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, RecordStoreError> {
        self.users.lock().map_err(|_| {
            warn!("in-memory store lock poisoned");
            RecordStoreError::connection("in-memory store lock poisoned")
        })
    }
}

#[async_trait]
impl UserRecordStore for InMemoryUserRecordStore {
    async fn create(&self, user: &User) -> Result<(), RecordStoreError> {
        let mut users = self.lock()?;
        if users.iter().any(|stored| stored.id() == user.id()) {
            return Err(RecordStoreError::query(format!(
                "duplicate user id {}",
                user.id()
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RecordStoreError> {
        let users = self.lock()?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RecordStoreError> {
        let users = self.lock()?;
        Ok(users.iter().find(|user| user.username() == username).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RecordStoreError> {
        Ok(self.lock()?.clone())
    }

    async fn save(&self, user: &User) -> Result<(), RecordStoreError> {
        let mut users = self.lock()?;
        match users.iter_mut().find(|stored| stored.id() == user.id()) {
            Some(stored) => *stored = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(())
    }
}
