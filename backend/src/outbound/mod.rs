//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL-backed store using Diesel
//! - **memory**: process-local store for database-less runs and tests
//!
//! Adapters translate between domain types and storage representations and
//! carry no business logic.

pub mod memory;
pub mod persistence;
