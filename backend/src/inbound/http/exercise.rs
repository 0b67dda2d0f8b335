//! Exercise tracker API handlers.
//!
//! ```text
//! POST /api/exercise/new-user  username=alice
//! POST /api/exercise/add       userId=...&description=run&duration=30&date=2024-01-01
//! GET  /api/exercise/users
//! GET  /api/exercise/log?userId=...&from=2024-01-01&to=2024-12-31&limit=10
//! ```
//!
//! Handled failures answer `200` with `{error}`. Requests missing the field
//! that names their subject are dropped with `204 No Content`.

use actix_web::{HttpResponse, get, post, web};
use tracing::debug;

use crate::domain::ports::NewExerciseRequest;
use crate::domain::{LogFilter, TrackerError, UserId, Username};
use crate::inbound::http::body::Submission;
use crate::inbound::http::error::HttpFailure;
use crate::inbound::http::exercise_dto::{
    AddExerciseBody, ErrorBody, ExerciseLogBody, LogQuery, LooseValue, NewUserBody, UserRecord,
    UserSummary,
};
use crate::inbound::http::state::HttpState;

type HandlerResult = Result<HttpResponse, HttpFailure>;

fn error_body(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok().json(ErrorBody {
        error: message.into(),
    })
}

/// Answer a tracker failure inline, or forward it when it is a record
/// validation failure.
fn respond_to_failure(error: TrackerError) -> HandlerResult {
    match error {
        TrackerError::InvalidRecord(validation) => Err(HttpFailure::from(validation)),
        handled => {
            debug!(code = handled.code(), "tracker request refused");
            Ok(error_body(handled.to_string()))
        }
    }
}

fn dropped(reason: &'static str) -> HandlerResult {
    debug!(reason, "request dropped without a response body");
    Ok(HttpResponse::NoContent().finish())
}

/// Register a user.
#[post("/new-user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: Submission<NewUserBody>,
) -> HandlerResult {
    let NewUserBody { username } = body.into_inner();
    let Some(Ok(username)) = username
        .and_then(LooseValue::into_truthy_text)
        .map(Username::new)
    else {
        return dropped("username missing");
    };

    match state.tracker.create_user(username).await {
        Ok(user) => Ok(HttpResponse::Ok().json(UserSummary::from(&user))),
        Err(error) => respond_to_failure(error),
    }
}

/// Append an exercise to a user's log and return the full record.
#[post("/add")]
pub async fn add_exercise(
    state: web::Data<HttpState>,
    body: Submission<AddExerciseBody>,
) -> HandlerResult {
    let AddExerciseBody {
        user_id,
        description,
        duration,
        date,
    } = body.into_inner();
    let Some(Ok(user_id)) = user_id
        .and_then(LooseValue::into_truthy_text)
        .map(UserId::new)
    else {
        return dropped("userId missing");
    };

    let request = NewExerciseRequest {
        user_id,
        description: description.and_then(LooseValue::into_truthy_text),
        duration: duration.map(Into::into),
        date: date.map(LooseValue::into_text),
    };

    match state.tracker.add_exercise(request).await {
        Ok(user) => Ok(HttpResponse::Ok().json(UserRecord::from(&user))),
        Err(error) => respond_to_failure(error),
    }
}

/// List every user as `{username, _id}`.
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> HandlerResult {
    match state.tracker.list_users().await {
        Ok(users) => {
            let body: Vec<UserSummary> = users.iter().map(UserSummary::from).collect();
            Ok(HttpResponse::Ok().json(body))
        }
        Err(error) => respond_to_failure(error),
    }
}

/// Return a user's log filtered by `from`, `to` and `limit`.
#[get("/log")]
pub async fn exercise_log(
    state: web::Data<HttpState>,
    query: web::Query<LogQuery>,
) -> HandlerResult {
    let LogQuery {
        user_id,
        from,
        to,
        limit,
    } = query.into_inner();
    let Some(Ok(user_id)) = user_id
        .filter(|raw| !raw.is_empty())
        .map(UserId::new)
    else {
        return respond_to_failure(TrackerError::UserNotFound);
    };

    let filter = LogFilter::from_raw(from.as_deref(), to.as_deref(), limit.as_deref());
    match state.tracker.exercise_log(&user_id, &filter).await {
        Ok(log) => Ok(HttpResponse::Ok().json(ExerciseLogBody::from(&log))),
        Err(error) => respond_to_failure(error),
    }
}

#[cfg(test)]
#[path = "exercise_tests.rs"]
mod tests;
