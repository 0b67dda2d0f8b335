//! Wire shapes for the exercise tracker endpoints.
//!
//! Request bodies accept loosely typed scalars because form bodies carry only
//! text while JSON bodies may carry numbers or booleans for the same field.

use serde::{Deserialize, Serialize, Serializer};

use crate::domain::{DurationInput, Exercise, ExerciseLog, User, format_calendar_date};

/// A scalar body value of any JSON type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl LooseValue {
    /// Zero, `NaN`, `false` and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Flag(flag) => *flag,
        }
    }

    /// Render as text, printing whole numbers without a fraction.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(value) => format_number(value),
            Self::Flag(flag) => flag.to_string(),
        }
    }

    /// Text when truthy, otherwise `None`.
    pub fn into_truthy_text(self) -> Option<String> {
        self.is_truthy().then(|| self.into_text())
    }
}

impl From<LooseValue> for DurationInput {
    fn from(value: LooseValue) -> Self {
        match value {
            LooseValue::Text(text) => Self::Text(text),
            LooseValue::Number(number) => Self::Number(number),
            LooseValue::Flag(flag) => Self::Number(if flag { 1.0 } else { 0.0 }),
        }
    }
}

fn format_number(value: f64) -> String {
    match whole_number(value) {
        Some(whole) => whole.to_string(),
        None => value.to_string(),
    }
}

const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[expect(
    clippy::cast_possible_truncation,
    reason = "only whole values inside the exact f64 integer range are cast"
)]
fn whole_number(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER)
        .then_some(value as i64)
}

/// Body of `POST /api/exercise/new-user`.
#[derive(Debug, Default, Deserialize)]
pub struct NewUserBody {
    #[serde(default)]
    pub username: Option<LooseValue>,
}

/// Body of `POST /api/exercise/add`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExerciseBody {
    #[serde(default)]
    pub user_id: Option<LooseValue>,
    #[serde(default)]
    pub description: Option<LooseValue>,
    #[serde(default)]
    pub duration: Option<LooseValue>,
    #[serde(default)]
    pub date: Option<LooseValue>,
}

/// Query of `GET /api/exercise/log`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// `{error}` body of a handled failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `{username, _id}` as returned by create-user and list-users.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            id: user.id().to_string(),
        }
    }
}

/// One log entry.
#[derive(Debug, Serialize)]
pub struct ExerciseEntry {
    pub description: String,
    #[serde(serialize_with = "serialize_minutes")]
    pub duration: f64,
    pub date: String,
}

impl From<&Exercise> for ExerciseEntry {
    fn from(exercise: &Exercise) -> Self {
        Self {
            description: exercise.description().to_owned(),
            duration: exercise.duration(),
            date: format_calendar_date(&exercise.date()),
        }
    }
}

/// Whole minutes serialise as integers, matching how clients submitted them.
fn serialize_minutes<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match whole_number(*value) {
        Some(whole) => serializer.serialize_i64(whole),
        None => serializer.serialize_f64(*value),
    }
}

/// Full user record returned by add-exercise.
#[derive(Debug, Serialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub exercises: Vec<ExerciseEntry>,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            exercises: user.exercises().iter().map(ExerciseEntry::from).collect(),
        }
    }
}

/// Filtered log returned by get-log.
#[derive(Debug, Serialize)]
pub struct ExerciseLogBody {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub total_exercise_count: usize,
    pub log: Vec<ExerciseEntry>,
}

impl From<&ExerciseLog> for ExerciseLogBody {
    fn from(log: &ExerciseLog) -> Self {
        Self {
            username: log.username.to_string(),
            id: log.user_id.to_string(),
            total_exercise_count: log.total_exercise_count,
            log: log.log.iter().map(ExerciseEntry::from).collect(),
        }
    }
}
