//! User aggregate: identity, username and the owned exercise log.

use std::fmt;

use rand::Rng;

use super::Exercise;

/// Length of generated user identifiers.
pub const USER_ID_LENGTH: usize = 9;

const USER_ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Validation errors returned by [`UserId`] and [`Username`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("username must not be empty")]
    EmptyUsername,
}

/// Opaque short identifier assigned to a user at creation.
///
/// Identifiers are never parsed for structure: any non-empty string is a
/// valid lookup key, and lookups for identifiers that were never issued
/// simply miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Generate a fresh URL-safe identifier.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::{UserId, USER_ID_LENGTH};
    ///
    /// let id = UserId::generate();
    /// assert_eq!(id.as_ref().len(), USER_ID_LENGTH);
    /// ```
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id = (0..USER_ID_LENGTH)
            .map(|_| {
                let index = rng.gen_range(0..USER_ID_ALPHABET.len());
                char::from(USER_ID_ALPHABET.get(index).copied().unwrap_or(b'_'))
            })
            .collect();
        Self(id)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Name chosen by the user. Uniqueness is a service rule, not a storage one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Application user and their append-only exercise log.
///
/// ## Invariants
/// - `id` never changes after creation.
/// - `exercises` is kept in insertion order; entries are only appended.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    username: Username,
    exercises: Vec<Exercise>,
}

impl User {
    /// Register a new user with a freshly generated identifier and an empty log.
    pub fn register(username: Username) -> Self {
        Self::new(UserId::generate(), username, Vec::new())
    }

    /// Rebuild a user from stored components.
    pub fn new(id: UserId, username: Username, exercises: Vec<Exercise>) -> Self {
        Self {
            id,
            username,
            exercises,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Username supplied at creation.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Exercises in the order they were logged.
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Append an exercise to the end of the log.
    pub fn log_exercise(&mut self, exercise: Exercise) {
        self.exercises.push(exercise);
    }
}
