//! Embedded schema migrations applied at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::RecordStoreError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations over a blocking connection.
///
/// Call from `spawn_blocking`; this opens its own synchronous connection.
///
/// # Errors
///
/// Returns [`RecordStoreError::Connection`] when the database is unreachable
/// and [`RecordStoreError::Query`] when a migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<(), RecordStoreError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| RecordStoreError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| RecordStoreError::query(format!("migration: {err}")))?;
    info!(applied = applied.len(), "database migrations applied");
    Ok(())
}
