//! End-to-end coverage of the exercise tracker API over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use exercise_tracker::Trace;
use exercise_tracker::domain::ExerciseTrackerService;
use exercise_tracker::inbound::http::configure;
use exercise_tracker::inbound::http::error::not_found;
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::middleware::TRACE_ID_HEADER;
use exercise_tracker::outbound::memory::InMemoryUserRecordStore;
use mockable::Clock;
use rstest::rstest;
use serde_json::{Value, json};

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 15, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

async fn tracker_app() -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
    let tracker = ExerciseTrackerService::new(
        Arc::new(InMemoryUserRecordStore::default()),
        Arc::new(FixtureClock),
    );
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(Arc::new(tracker))))
            .wrap(Trace)
            .configure(configure)
            .default_service(web::to(not_found)),
    )
    .await
}

async fn post_form<S>(app: &S, uri: &str, form: &str) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = actix_test::TestRequest::post()
        .uri(uri)
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(form.to_owned())
        .to_request();
    actix_test::call_service(app, req).await
}

async fn post_json<S>(app: &S, uri: &str, body: Value) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, req).await
}

async fn get_json<S>(app: &S, uri: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = actix_test::TestRequest::get().uri(uri).to_request();
    let res = actix_test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    actix_test::read_body_json(res).await
}

async fn create_user<S>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = post_json(app, "/api/exercise/new-user", json!({"username": username})).await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("username"), Some(&json!(username)));
    body.get("_id")
        .and_then(Value::as_str)
        .expect("created user id")
        .to_owned()
}

#[actix_web::test]
async fn alice_logs_run_and_swim() {
    let app = tracker_app().await;
    let id = create_user(&app, "alice").await;
    assert_eq!(id.len(), 9);

    for form in [
        format!("userId={id}&description=run&duration=30&date=2024-01-01"),
        format!("userId={id}&description=swim&duration=45&date=2024-01-10"),
    ] {
        let res = post_form(&app, "/api/exercise/add", &form).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let full = get_json(&app, &format!("/api/exercise/log?userId={id}")).await;
    assert_eq!(
        full,
        json!({
            "username": "alice",
            "_id": id,
            "total_exercise_count": 2,
            "log": [
                {"description": "run", "duration": 30, "date": "2024-01-01T00:00:00.000Z"},
                {"description": "swim", "duration": 45, "date": "2024-01-10T00:00:00.000Z"}
            ]
        })
    );

    let from_fifth =
        get_json(&app, &format!("/api/exercise/log?userId={id}&from=2024-01-05")).await;
    assert_eq!(
        from_fifth,
        json!({
            "username": "alice",
            "_id": id,
            "total_exercise_count": 2,
            "log": [
                {"description": "swim", "duration": 45, "date": "2024-01-10T00:00:00.000Z"}
            ]
        })
    );

    let limited = get_json(&app, &format!("/api/exercise/log?userId={id}&limit=1")).await;
    assert_eq!(
        limited.get("log"),
        Some(&json!([
            {"description": "run", "duration": 30, "date": "2024-01-01T00:00:00.000Z"}
        ]))
    );

    let all_but_last = get_json(&app, &format!("/api/exercise/log?userId={id}&limit=-1")).await;
    assert_eq!(
        all_but_last.get("log"),
        Some(&json!([
            {"description": "run", "duration": 30, "date": "2024-01-01T00:00:00.000Z"}
        ]))
    );
}

#[actix_web::test]
async fn duplicate_username_is_refused() {
    let app = tracker_app().await;
    create_user(&app, "alice").await;

    let res = post_json(&app, "/api/exercise/new-user", json!({"username": "alice"})).await;
    let body: Value = actix_test::read_body_json(res).await;

    assert_eq!(body, json!({"error": "user exists"}));
    assert_eq!(get_json(&app, "/api/exercise/users").await.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn users_list_in_creation_order() {
    let app = tracker_app().await;
    assert_eq!(get_json(&app, "/api/exercise/users").await, json!([]));

    let zed = create_user(&app, "zed").await;
    let amy = create_user(&app, "amy").await;

    assert_eq!(
        get_json(&app, "/api/exercise/users").await,
        json!([
            {"username": "zed", "_id": zed},
            {"username": "amy", "_id": amy}
        ])
    );
}

#[actix_web::test]
async fn unknown_user_is_not_found_everywhere() {
    let app = tracker_app().await;

    let res = post_form(
        &app,
        "/api/exercise/add",
        "userId=missing&description=run&duration=30",
    )
    .await;
    let added: Value = actix_test::read_body_json(res).await;
    let log = get_json(&app, "/api/exercise/log?userId=missing").await;

    assert_eq!(added, json!({"error": "user not found"}));
    assert_eq!(log, json!({"error": "user not found"}));
    assert_eq!(get_json(&app, "/api/exercise/users").await, json!([]));
}

#[rstest]
#[case(json!({"description": "run"}))]
#[case(json!({"duration": 30}))]
#[case(json!({"description": "run", "duration": 0}))]
#[case(json!({"description": "", "duration": 30}))]
#[actix_web::test]
async fn missing_fields_leave_log_untouched(#[case] fields: Value) {
    let app = tracker_app().await;
    let id = create_user(&app, "alice").await;
    let mut body = fields;
    if let Some(object) = body.as_object_mut() {
        object.insert("userId".to_owned(), json!(id));
    }

    let res = post_json(&app, "/api/exercise/add", body).await;
    let reply: Value = actix_test::read_body_json(res).await;

    assert_eq!(reply, json!({"error": "description or duration missing"}));
    let log = get_json(&app, &format!("/api/exercise/log?userId={id}")).await;
    assert_eq!(log.get("total_exercise_count"), Some(&json!(0)));
}

#[actix_web::test]
async fn form_zero_duration_is_text_and_accepted() {
    let app = tracker_app().await;
    let id = create_user(&app, "alice").await;

    let res = post_form(
        &app,
        "/api/exercise/add",
        &format!("userId={id}&description=stretch&duration=0&date=2024-01-03"),
    )
    .await;
    let record: Value = actix_test::read_body_json(res).await;

    assert_eq!(
        record.get("exercises"),
        Some(&json!([
            {"description": "stretch", "duration": 0, "date": "2024-01-03T00:00:00.000Z"}
        ]))
    );
}

#[actix_web::test]
async fn adding_appends_and_preserves_order() {
    let app = tracker_app().await;
    let id = create_user(&app, "alice").await;
    post_json(
        &app,
        "/api/exercise/add",
        json!({"userId": id, "description": "run", "duration": 30, "date": "2024-03-01"}),
    )
    .await;

    let res = post_json(
        &app,
        "/api/exercise/add",
        json!({"userId": id, "description": "row", "duration": 20.5}),
    )
    .await;
    let record: Value = actix_test::read_body_json(res).await;

    assert_eq!(
        record,
        json!({
            "_id": id,
            "username": "alice",
            "exercises": [
                {"description": "run", "duration": 30, "date": "2024-03-01T00:00:00.000Z"},
                {"description": "row", "duration": 20.5, "date": "2024-06-01T09:15:00.000Z"}
            ]
        })
    );
}

#[actix_web::test]
async fn non_numeric_duration_is_a_plain_text_400() {
    let app = tracker_app().await;
    let id = create_user(&app, "alice").await;

    let res = post_form(
        &app,
        "/api/exercise/add",
        &format!("userId={id}&description=run&duration=abc"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = actix_test::read_body(res).await;
    assert_eq!(
        body.as_ref(),
        b"Cast to Number failed for value \"abc\" at path \"duration\""
    );
    let log = get_json(&app, &format!("/api/exercise/log?userId={id}")).await;
    assert_eq!(log.get("total_exercise_count"), Some(&json!(0)));
}

#[rstest]
#[case(json!({}))]
#[case(json!({"username": ""}))]
#[actix_web::test]
async fn empty_username_gets_an_empty_response(#[case] body: Value) {
    let app = tracker_app().await;

    let res = post_json(&app, "/api/exercise/new-user", body).await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(actix_test::read_body(res).await.is_empty());
    assert_eq!(get_json(&app, "/api/exercise/users").await, json!([]));
}

#[actix_web::test]
async fn unmatched_route_is_plain_text_404_with_trace_id() {
    let app = tracker_app().await;

    let req = actix_test::TestRequest::get()
        .uri("/api/exercise/nowhere")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body = actix_test::read_body(res).await;
    assert_eq!(body.as_ref(), b"not found");
}

#[actix_web::test]
async fn landing_page_is_served() {
    let app = tracker_app().await;

    let req = actix_test::TestRequest::get().uri("/").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
        .expect("content type");
    assert!(content_type.starts_with("text/html"));
}
