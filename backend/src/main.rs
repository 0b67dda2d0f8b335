//! Exercise tracker entry point: loads settings, prepares storage and serves
//! the HTTP API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use exercise_tracker::config::ServerSettings;
use exercise_tracker::inbound::http::health::HealthState;
use exercise_tracker::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, create_server};

async fn connect_database(settings: &ServerSettings, url: &str) -> std::io::Result<DbPool> {
    let migration_url = url.to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(std::io::Error::other)?;

    let pool_config = PoolConfig::new(url).with_max_size(settings.pool_max_size);
    DbPool::new(&pool_config)
        .await
        .map_err(std::io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect_database(&settings, url).await?);
        info!(pool_max_size = settings.pool_max_size, "using PostgreSQL record store");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "exercise tracker listening");
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
