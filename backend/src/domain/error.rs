//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter decides which of
//! them are answered inline and which are forwarded to the error classifier.

use super::RecordValidationError;

/// Outcome of a tracker operation that did not succeed.
///
/// Display strings are the client-facing messages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackerError {
    /// Another user already holds the requested username.
    #[error("user exists")]
    UserExists,
    /// No user matches the supplied identifier.
    #[error("user not found")]
    UserNotFound,
    /// An exercise was submitted without a description or duration.
    #[error("description or duration missing")]
    MissingExerciseFields,
    /// Persisting a new user failed.
    #[error("save failure")]
    UserSaveFailed,
    /// Persisting an appended exercise failed.
    #[error("exercise save failure")]
    ExerciseSaveFailed,
    /// Listing users failed.
    #[error("error retrieving users")]
    UsersUnavailable,
    /// The exercise record failed field validation.
    #[error(transparent)]
    InvalidRecord(#[from] RecordValidationError),
}

impl TrackerError {
    /// Stable identifier used in structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserExists => "user_exists",
            Self::UserNotFound => "user_not_found",
            Self::MissingExerciseFields => "missing_exercise_fields",
            Self::UserSaveFailed => "user_save_failed",
            Self::ExerciseSaveFailed => "exercise_save_failed",
            Self::UsersUnavailable => "users_unavailable",
            Self::InvalidRecord(_) => "invalid_record",
        }
    }
}
