//! Builds the HTTP state from the configured record store.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;
use tracing::warn;

use exercise_tracker::domain::ExerciseTrackerService;
use exercise_tracker::domain::ports::ExerciseTracker;
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::memory::InMemoryUserRecordStore;
use exercise_tracker::outbound::persistence::DieselUserRecordStore;

use super::ServerConfig;

/// Wire the tracker service over PostgreSQL when a pool is configured,
/// otherwise over the in-memory store.
pub fn build_http_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> web::Data<HttpState> {
    let tracker: Arc<dyn ExerciseTracker> = match &config.db_pool {
        Some(pool) => Arc::new(ExerciseTrackerService::new(
            Arc::new(DieselUserRecordStore::new(pool.clone())),
            clock,
        )),
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            Arc::new(ExerciseTrackerService::new(
                Arc::new(InMemoryUserRecordStore::default()),
                clock,
            ))
        }
    };
    web::Data::new(HttpState::new(tracker))
}
