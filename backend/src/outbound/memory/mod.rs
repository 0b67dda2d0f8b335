//! In-memory user record store.
//!
//! Used when no database is configured and by the HTTP test suites. State
//! lives for the lifetime of the process.

mod in_memory_user_record_store;

pub use in_memory_user_record_store::InMemoryUserRecordStore;
