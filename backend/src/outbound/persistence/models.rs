//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{exercises, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub username: String,
}

/// Row inserted into `users`. `created_at` comes from the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
}

/// Row read from `exercises`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exercises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExerciseRow {
    pub user_id: String,
    #[expect(dead_code, reason = "log order is applied by the query")]
    pub position: i32,
    pub description: String,
    pub duration: f64,
    pub date: DateTime<Utc>,
}

/// Row inserted into `exercises`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exercises)]
pub(crate) struct NewExerciseRow<'a> {
    pub user_id: &'a str,
    pub position: i32,
    pub description: &'a str,
    pub duration: f64,
    pub date: DateTime<Utc>,
}
