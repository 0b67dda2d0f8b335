//! PostgreSQL persistence adapter using Diesel.
//!
//! Implements [`crate::domain::ports::UserRecordStore`] over `diesel-async`
//! with a `bb8` pool. Row structs (`models`) and table definitions (`schema`)
//! stay private to this module.
//!
//! # Example
//!
//! ```rust,no_run
//! use exercise_tracker::outbound::persistence::{
//!     DbPool, DieselUserRecordStore, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PoolConfig::new("postgres://localhost/tracker");
//! run_pending_migrations(config.database_url())?;
//! let store = DieselUserRecordStore::new(DbPool::new(&config).await?);
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_user_record_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_record_store::DieselUserRecordStore;
pub use migrations::run_pending_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
