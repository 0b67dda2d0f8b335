//! Exercise log filtering: inclusive date bounds followed by a result limit.

use chrono::{DateTime, Utc};

use super::calendar::parse_calendar_date;
use super::{Exercise, User, UserId, Username};

/// Optional bounds applied to a user's log.
///
/// Bounds that fail to parse are dropped rather than rejected, so a bad
/// `from` simply means "no lower bound".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogFilter {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    limit: Option<f64>,
}

impl LogFilter {
    /// Build a filter from raw query values.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::LogFilter;
    ///
    /// let filter = LogFilter::from_raw(Some("2024-01-05"), Some("soon"), Some("3"));
    /// assert!(filter.from().is_some());
    /// assert!(filter.to().is_none());
    /// assert_eq!(filter.limit(), Some(3.0));
    /// ```
    pub fn from_raw(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            from: from.and_then(parse_calendar_date),
            to: to.and_then(parse_calendar_date),
            limit: limit.and_then(parse_limit),
        }
    }

    /// Lower bound, inclusive.
    pub fn from(&self) -> Option<DateTime<Utc>> {
        self.from
    }

    /// Upper bound, inclusive.
    pub fn to(&self) -> Option<DateTime<Utc>> {
        self.to
    }

    /// Maximum number of entries to return.
    pub fn limit(&self) -> Option<f64> {
        self.limit
    }

    /// Apply the bounds in order (`from`, then `to`, then `limit`).
    ///
    /// A limit keeps the earliest-logged entries and a negative limit drops
    /// the latest ones; no reordering happens.
    pub fn apply<'a>(&self, exercises: &'a [Exercise]) -> Vec<&'a Exercise> {
        let mut kept: Vec<&Exercise> = exercises.iter().collect();

        if let Some(from) = self.from {
            kept.retain(|exercise| exercise.date() >= from);
        }
        if let Some(to) = self.to {
            kept.retain(|exercise| exercise.date() <= to);
        }
        if let Some(limit) = self.limit {
            kept.truncate(keep_count(limit, kept.len()));
        }

        kept
    }
}

/// Numeric coercion of the `limit` query value.
///
/// Blank input coerces to zero, anything else must parse as a number.
fn parse_limit(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Entries kept for `limit`: a non-negative limit keeps that many from the
/// front, a negative one drops that many from the back.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "float to usize casts saturate and the limit is truncated first"
)]
fn keep_count(limit: f64, len: usize) -> usize {
    if (len as f64) <= limit {
        return len;
    }
    let whole = limit.trunc();
    if whole >= 0.0 {
        whole as usize
    } else {
        len.saturating_sub((-whole) as usize)
    }
}

/// A user's log after filtering, together with the unfiltered total.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseLog {
    pub user_id: UserId,
    pub username: Username,
    pub total_exercise_count: usize,
    pub log: Vec<Exercise>,
}

impl ExerciseLog {
    /// Filter `user`'s exercises; the total is counted before filtering.
    pub fn for_user(user: &User, filter: &LogFilter) -> Self {
        let exercises = user.exercises();
        Self {
            user_id: user.id().clone(),
            username: user.username().clone(),
            total_exercise_count: exercises.len(),
            log: filter.apply(exercises).into_iter().cloned().collect(),
        }
    }
}
