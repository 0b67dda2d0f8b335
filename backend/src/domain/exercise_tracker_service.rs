//! Exercise tracker domain service.
//!
//! Implements the [`ExerciseTracker`] driving port over any
//! [`UserRecordStore`]. Store failures are logged here and collapsed into the
//! generic failure of the operation that hit them; no call is retried.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{ExerciseTracker, NewExerciseRequest, RecordStoreError, UserRecordStore};
use crate::domain::{Exercise, ExerciseLog, LogFilter, TrackerError, User, UserId, Username};

/// Tracker service built once at startup and shared by every request.
#[derive(Clone)]
pub struct ExerciseTrackerService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> ExerciseTrackerService<S> {
    /// Create a service over the given store.
    ///
    /// `clock` supplies the date of exercises logged without a valid one.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use exercise_tracker::domain::ExerciseTrackerService;
    /// use exercise_tracker::outbound::memory::InMemoryUserRecordStore;
    /// use mockable::DefaultClock;
    ///
    /// let service = ExerciseTrackerService::new(
    ///     Arc::new(InMemoryUserRecordStore::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

fn log_store_error(operation: &'static str, error: &RecordStoreError) {
    match error {
        RecordStoreError::Connection { .. } => {
            error!(operation, %error, "record store unavailable");
        }
        RecordStoreError::Query { .. } => {
            error!(operation, %error, "record store query failed");
        }
    }
}

impl<S> ExerciseTrackerService<S>
where
    S: UserRecordStore,
{
    async fn find_user(
        &self,
        user_id: &UserId,
        operation: &'static str,
        on_failure: TrackerError,
    ) -> Result<User, TrackerError> {
        match self.store.find_by_id(user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                debug!(operation, %user_id, "user not found");
                Err(TrackerError::UserNotFound)
            }
            Err(store_error) => {
                log_store_error(operation, &store_error);
                Err(on_failure)
            }
        }
    }
}

#[async_trait]
impl<S> ExerciseTracker for ExerciseTrackerService<S>
where
    S: UserRecordStore,
{
    async fn create_user(&self, username: Username) -> Result<User, TrackerError> {
        let existing = self
            .store
            .find_by_username(&username)
            .await
            .map_err(|store_error| {
                log_store_error("create_user", &store_error);
                TrackerError::UserSaveFailed
            })?;
        if existing.is_some() {
            debug!(%username, "username already taken");
            return Err(TrackerError::UserExists);
        }

        let user = User::register(username);
        self.store.create(&user).await.map_err(|store_error| {
            log_store_error("create_user", &store_error);
            TrackerError::UserSaveFailed
        })?;

        info!(user_id = %user.id(), username = %user.username(), "user created");
        Ok(user)
    }

    async fn add_exercise(&self, request: NewExerciseRequest) -> Result<User, TrackerError> {
        let NewExerciseRequest {
            user_id,
            description,
            duration,
            date,
        } = request;

        let mut user = self
            .find_user(&user_id, "add_exercise", TrackerError::ExerciseSaveFailed)
            .await?;

        let description_present = description.as_deref().is_some_and(|text| !text.is_empty());
        let duration_present = duration.as_ref().is_some_and(|value| value.is_present());
        if !description_present || !duration_present {
            return Err(TrackerError::MissingExerciseFields);
        }

        let exercise = Exercise::try_new(description, duration, date.as_deref(), self.clock.utc())?;
        user.log_exercise(exercise);

        self.store.save(&user).await.map_err(|store_error| {
            log_store_error("add_exercise", &store_error);
            TrackerError::ExerciseSaveFailed
        })?;

        info!(
            user_id = %user.id(),
            exercise_count = user.exercises().len(),
            "exercise logged"
        );
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, TrackerError> {
        self.store.find_all().await.map_err(|store_error| {
            log_store_error("list_users", &store_error);
            TrackerError::UsersUnavailable
        })
    }

    async fn exercise_log(
        &self,
        user_id: &UserId,
        filter: &LogFilter,
    ) -> Result<ExerciseLog, TrackerError> {
        let user = self
            .find_user(user_id, "exercise_log", TrackerError::UsersUnavailable)
            .await?;
        Ok(ExerciseLog::for_user(&user, filter))
    }
}

#[cfg(test)]
#[path = "exercise_tracker_service_tests.rs"]
mod tests;
