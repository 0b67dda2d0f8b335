//! Domain primitives, aggregates and services.
//!
//! Purpose: define the exercise tracker's entities and the use-cases that
//! operate on them, independent of HTTP and storage. Adapters reach the
//! domain through [`ports`].
//!
//! Public surface:
//! - `User`, `UserId`, `Username`: a user and their append-only log.
//! - `Exercise`, `DurationInput`: one logged activity and its raw duration.
//! - `RecordValidationError`, `FieldError`: ordered field-level failures.
//! - `LogFilter`, `ExerciseLog`: log filtering and its result.
//! - `TrackerError`: handled outcomes of the tracker use-cases.
//! - `ExerciseTrackerService`: the [`ports::ExerciseTracker`] implementation.

pub mod calendar;
pub mod error;
pub mod exercise;
pub mod exercise_tracker_service;
pub mod log_filter;
pub mod ports;
pub mod user;

pub use self::calendar::{format_calendar_date, parse_calendar_date};
pub use self::error::TrackerError;
pub use self::exercise::{DurationInput, Exercise, FieldError, RecordValidationError};
pub use self::exercise_tracker_service::ExerciseTrackerService;
pub use self::log_filter::{ExerciseLog, LogFilter};
pub use self::user::{USER_ID_LENGTH, User, UserId, UserValidationError, Username};
