//! Exercise entries and the record validation applied when building them.

use std::fmt;

use chrono::{DateTime, Utc};

use super::calendar::{parse_calendar_date, to_stored_precision};

/// Duration as supplied by a client: JSON bodies carry numbers, form bodies
/// carry text.
#[derive(Debug, Clone, PartialEq)]
pub enum DurationInput {
    Number(f64),
    Text(String),
}

impl DurationInput {
    /// Whether the value counts as supplied. Zero and empty text do not.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Text(text) => !text.is_empty(),
        }
    }

    fn to_minutes(&self) -> Result<f64, FieldError> {
        let cast_error = |raw: String| {
            FieldError::new(
                "duration",
                format!("Cast to Number failed for value \"{raw}\" at path \"duration\""),
            )
        };
        match self {
            Self::Number(value) if value.is_finite() => Ok(*value),
            Self::Number(value) => Err(cast_error(value.to_string())),
            Self::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(cast_error(text.clone())),
            },
        }
    }
}

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: String,
    message: String,
}

impl FieldError {
    /// Build a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Path of the failing field.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Human readable reason.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Field-keyed validation failure raised while constructing a record.
///
/// ## Invariants
/// - `errors` is never empty.
/// - Order follows the order fields were checked, so [`Self::first`] is
///   deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordValidationError {
    errors: Vec<FieldError>,
}

impl RecordValidationError {
    /// Collect field errors, returning `None` when there are none.
    pub fn from_errors(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// The first recorded failure.
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    /// All failures in check order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some(first) => write!(f, "record validation failed: {}", first.message()),
            None => f.write_str("record validation failed"),
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// One logged activity.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    description: String,
    duration: f64,
    date: DateTime<Utc>,
}

impl Exercise {
    /// Build an exercise from raw request values.
    ///
    /// The date is used only when it parses to a valid calendar date;
    /// otherwise `logged_at` applies.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use exercise_tracker::domain::{DurationInput, Exercise};
    ///
    /// let exercise = Exercise::try_new(
    ///     Some("run".to_owned()),
    ///     Some(DurationInput::Text("30".to_owned())),
    ///     Some("2024-01-01"),
    ///     Utc::now(),
    /// )
    /// .expect("valid exercise");
    /// assert_eq!(exercise.duration(), 30.0);
    /// ```
    pub fn try_new(
        description: Option<String>,
        duration: Option<DurationInput>,
        date: Option<&str>,
        logged_at: DateTime<Utc>,
    ) -> Result<Self, RecordValidationError> {
        let mut errors = Vec::new();

        let description = match description {
            Some(text) if !text.is_empty() => Some(text),
            _ => {
                errors.push(FieldError::new(
                    "description",
                    "Path `description` is required.",
                ));
                None
            }
        };

        let duration = match duration.as_ref().map(DurationInput::to_minutes) {
            Some(Ok(minutes)) => Some(minutes),
            Some(Err(error)) => {
                errors.push(error);
                None
            }
            None => {
                errors.push(FieldError::new("duration", "Path `duration` is required."));
                None
            }
        };

        let date = date
            .and_then(parse_calendar_date)
            .unwrap_or_else(|| to_stored_precision(logged_at));

        match (description, duration) {
            (Some(description), Some(duration)) => Ok(Self::from_parts(description, duration, date)),
            _ => Err(RecordValidationError { errors }),
        }
    }

    /// Rebuild an exercise from stored values.
    pub fn from_parts(description: String, duration: f64, date: DateTime<Utc>) -> Self {
        Self {
            description,
            duration,
            date,
        }
    }

    /// What was done.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Length in minutes.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// When it happened.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
