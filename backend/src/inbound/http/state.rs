//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the
//! [`ExerciseTracker`] port, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::ExerciseTracker;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tracker: Arc<dyn ExerciseTracker>,
}

impl HttpState {
    /// Wrap the tracker use-cases.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use exercise_tracker::domain::ExerciseTrackerService;
    /// use exercise_tracker::inbound::http::state::HttpState;
    /// use exercise_tracker::outbound::memory::InMemoryUserRecordStore;
    /// use mockable::DefaultClock;
    ///
    /// let tracker = ExerciseTrackerService::new(
    ///     Arc::new(InMemoryUserRecordStore::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::new(Arc::new(tracker));
    /// # let _ = state;
    /// ```
    pub fn new(tracker: Arc<dyn ExerciseTracker>) -> Self {
        Self { tracker }
    }
}
