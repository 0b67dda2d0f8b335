//! PostgreSQL-backed user record store.
//!
//! A user is one `users` row plus its `exercises` rows ordered by
//! `position`. `save` rewrites the whole log inside a transaction, so the last
//! save for a user wins.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{RecordStoreError, UserRecordStore};
use crate::domain::{Exercise, User, UserId, Username};

use super::models::{ExerciseRow, NewExerciseRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{exercises, users};

/// Diesel implementation of [`UserRecordStore`].
#[derive(Clone)]
pub struct DieselUserRecordStore {
    pool: DbPool,
}

impl DieselUserRecordStore {
    /// Create a store over the given pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use exercise_tracker::outbound::persistence::{
    ///     DbPool, DieselUserRecordStore, PoolConfig,
    /// };
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(&PoolConfig::new("postgres://localhost/tracker")).await?;
    /// let store = DieselUserRecordStore::new(pool);
    /// # let _ = store;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecordStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecordStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RecordStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let error_message = error.to_string();
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                error = %error_message,
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error_message,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RecordStoreError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            RecordStoreError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => RecordStoreError::query(info.message().to_owned()),
        _ => RecordStoreError::query(error_message),
    }
}

fn to_exercise(row: ExerciseRow) -> Exercise {
    Exercise::from_parts(row.description, row.duration, row.date)
}

fn to_user(row: UserRow, exercises: Vec<Exercise>) -> Result<User, RecordStoreError> {
    let id = UserId::new(row.id)
        .map_err(|err| RecordStoreError::query(format!("stored user id: {err}")))?;
    let username = Username::new(row.username)
        .map_err(|err| RecordStoreError::query(format!("stored username: {err}")))?;
    Ok(User::new(id, username, exercises))
}

fn exercise_rows(user: &User) -> Result<Vec<NewExerciseRow<'_>>, RecordStoreError> {
    let user_id = user.id().as_ref();
    user.exercises()
        .iter()
        .enumerate()
        .map(|(index, exercise)| {
            let position = i32::try_from(index)
                .map_err(|_| RecordStoreError::query("exercise log too long"))?;
            Ok(NewExerciseRow {
                user_id,
                position,
                description: exercise.description(),
                duration: exercise.duration(),
                date: exercise.date(),
            })
        })
        .collect()
}

async fn load_exercises(
    conn: &mut AsyncPgConnection,
    user_id: &str,
) -> Result<Vec<Exercise>, diesel::result::Error> {
    let rows: Vec<ExerciseRow> = exercises::table
        .filter(exercises::user_id.eq(user_id))
        .order(exercises::position.asc())
        .select(ExerciseRow::as_select())
        .load(conn)
        .await?;
    Ok(rows.into_iter().map(to_exercise).collect())
}

#[async_trait]
impl UserRecordStore for DieselUserRecordStore {
    async fn create(&self, user: &User) -> Result<(), RecordStoreError> {
        let new_user = NewUserRow {
            id: user.id().as_ref(),
            username: user.username().as_ref(),
        };
        let new_exercises = exercise_rows(user)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&new_user)
                    .execute(conn)
                    .await?;
                if !new_exercises.is_empty() {
                    diesel::insert_into(exercises::table)
                        .values(&new_exercises)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let log = load_exercises(&mut conn, &row.id)
            .await
            .map_err(map_diesel_error)?;
        to_user(row, log).map(Some)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let log = load_exercises(&mut conn, &row.id)
            .await
            .map_err(map_diesel_error)?;
        to_user(row, log).map(Some)
    }

    async fn find_all(&self) -> Result<Vec<User>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let exercise_rows: Vec<ExerciseRow> = exercises::table
            .order((exercises::user_id.asc(), exercises::position.asc()))
            .select(ExerciseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut logs: HashMap<String, Vec<Exercise>> = HashMap::new();
        for row in exercise_rows {
            logs.entry(row.user_id.clone())
                .or_default()
                .push(to_exercise(row));
        }

        user_rows
            .into_iter()
            .map(|row| {
                let log = logs.remove(&row.id).unwrap_or_default();
                to_user(row, log)
            })
            .collect()
    }

    async fn save(&self, user: &User) -> Result<(), RecordStoreError> {
        let user_row = NewUserRow {
            id: user.id().as_ref(),
            username: user.username().as_ref(),
        };
        let new_exercises = exercise_rows(user)?;
        let user_id = user.id().as_ref();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&user_row)
                    .on_conflict(users::id)
                    .do_update()
                    .set(users::username.eq(excluded(users::username)))
                    .execute(conn)
                    .await?;
                diesel::delete(exercises::table.filter(exercises::user_id.eq(user_id)))
                    .execute(conn)
                    .await?;
                if !new_exercises.is_empty() {
                    diesel::insert_into(exercises::table)
                        .values(&new_exercises)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
