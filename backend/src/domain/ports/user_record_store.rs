//! Driven port for the User record store.
//!
//! The store owns persistence layout entirely; the domain only hands it
//! whole [`User`] aggregates and reads them back.

use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "record store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "record store query failed: {message}",
    }
}

/// Persistence port for user records.
///
/// Reads and writes are independent calls: a read-modify-save sequence is not
/// transactional, and the last save for a user wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRecordStore: Send + Sync {
    /// Persist a newly created user.
    async fn create(&self, user: &User) -> Result<(), RecordStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RecordStoreError>;

    /// Fetch the first user holding exactly this username.
    async fn find_by_username(&self, username: &Username)
    -> Result<Option<User>, RecordStoreError>;

    /// Fetch every user in store order.
    async fn find_all(&self) -> Result<Vec<User>, RecordStoreError>;

    /// Overwrite a stored user, including its full exercise log.
    async fn save(&self, user: &User) -> Result<(), RecordStoreError>;
}
