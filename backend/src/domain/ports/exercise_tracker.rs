//! Driving port used by inbound adapters to run tracker use-cases.

use async_trait::async_trait;

use crate::domain::{DurationInput, ExerciseLog, LogFilter, TrackerError, User, UserId, Username};

/// Raw exercise submission for an existing user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExerciseRequest {
    pub user_id: UserId,
    pub description: Option<String>,
    pub duration: Option<DurationInput>,
    pub date: Option<String>,
}

/// Domain use-case port for the exercise tracker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseTracker: Send + Sync {
    /// Register a user unless the username is taken.
    async fn create_user(&self, username: Username) -> Result<User, TrackerError>;

    /// Append an exercise and return the updated user.
    async fn add_exercise(&self, request: NewExerciseRequest) -> Result<User, TrackerError>;

    /// Return every user in store order.
    async fn list_users(&self) -> Result<Vec<User>, TrackerError>;

    /// Return a user's filtered log.
    async fn exercise_log(
        &self,
        user_id: &UserId,
        filter: &LogFilter,
    ) -> Result<ExerciseLog, TrackerError>;
}
