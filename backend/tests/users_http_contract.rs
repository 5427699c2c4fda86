//! End-to-end HTTP contract for the users API.
//!
//! Requests travel through the real handlers, `UsersService` and the
//! in-memory repository, so status codes and error envelopes are checked
//! exactly as a client sees them.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use users_service::Trace;
use users_service::domain::{TRACE_ID_HEADER, TraceId, UsersService};
use users_service::inbound::http::state::HttpState;
use users_service::inbound::http::users::users_scope;
use users_service::outbound::memory::InMemoryUserRepository;

async fn app() -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let service = UsersService::new(std::sync::Arc::new(InMemoryUserRepository::new()));
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::from_service(service)))
            .wrap(Trace)
            .service(users_scope()),
    )
    .await
}

async fn send<S>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

fn create(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/v1/users").set_json(body)
}

fn update(body: Value) -> test::TestRequest {
    test::TestRequest::put().uri("/v1/users").set_json(body)
}

fn envelope(code: &str, message: &str, status: u16) -> Value {
    json!({ "error_code": code, "error_message": message, "status": status })
}

#[actix_web::test]
async fn create_then_fetch_round_trip() {
    let app = app().await;

    let (status, created) =
        send(&app, create(json!({"name":"A","email":"a@x.com","age":30}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, json!({"id":1,"name":"A","email":"a@x.com","age":30}));

    let (status, fetched) = send(&app, test::TestRequest::get().uri("/v1/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn duplicate_email_conflicts() {
    let app = app().await;
    send(&app, create(json!({"name":"A","email":"a@x.com","age":30}))).await;

    let (status, body) =
        send(&app, create(json!({"name":"B","email":"a@x.com","age":22}))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        envelope("ErrUserAlreadyExists", "user already exists", 409)
    );
}

#[actix_web::test]
async fn empty_store_lists_no_users() {
    let app = app().await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/v1/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"users": []}));
}

#[actix_web::test]
async fn list_is_ordered_by_id() {
    let app = app().await;
    for (name, email) in [("A", "a@x.com"), ("B", "b@x.com"), ("C", "c@x.com")] {
        send(&app, create(json!({"name":name,"email":email,"age":20}))).await;
    }

    let (_, body) = send(&app, test::TestRequest::get().uri("/v1/users")).await;
    let ids: Vec<i64> = body["users"]
        .as_array()
        .expect("users array")
        .iter()
        .map(|user| user["id"].as_i64().expect("numeric id"))
        .collect();

    assert_eq!(ids, vec![1, 2, 3]);
}

#[rstest]
#[case("/v1/users/99999")]
#[case("/v1/users/0")]
#[case("/v1/users/-5")]
#[actix_web::test]
async fn unknown_id_is_not_found(#[case] uri: &str) {
    let app = app().await;

    let (status, body) = send(&app, test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, envelope("ErrUserNotFound", "user not found", 404));
}

#[rstest]
#[case("/v1/users/abc")]
#[case("/v1/users/1.5")]
#[case("/v1/users/99999999999999999999")]
#[actix_web::test]
async fn non_integer_id_is_rejected(#[case] uri: &str) {
    let app = app().await;

    let (get_status, get_body) = send(&app, test::TestRequest::get().uri(uri)).await;
    let (delete_status, delete_body) = send(&app, test::TestRequest::delete().uri(uri)).await;

    let expected = envelope("ErrInvalidID", "invalid id", 400);
    assert_eq!(get_status, StatusCode::BAD_REQUEST);
    assert_eq!(get_body, expected);
    assert_eq!(delete_status, StatusCode::BAD_REQUEST);
    assert_eq!(delete_body, expected);
}

#[rstest]
#[case(json!({"name":"A","email":"not-an-email","age":30}))]
#[case(json!({"name":"","email":"a@x.com","age":30}))]
#[case(json!(["A","a@x.com",30]))]
#[case(json!({"name":"A","email":"a@x.com","age":0}))]
#[case(json!({"name":"A","email":"a@x.com"}))]
#[case(json!({"email":"a@x.com","age":30}))]
#[case(json!({"name":"A","age":30}))]
#[actix_web::test]
async fn invalid_create_payload_is_rejected(#[case] payload: Value) {
    let app = app().await;

    let (status, body) = send(&app, create(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        envelope("ErrValidationFailed", "validation failed", 400)
    );

    let (_, listed) = send(&app, test::TestRequest::get().uri("/v1/users")).await;
    assert_eq!(listed, json!({"users": []}));
}

#[actix_web::test]
async fn whitespace_only_name_is_stored_as_sent() {
    let app = app().await;

    let (status, created) =
        send(&app, create(json!({"name":"   ","email":"a@x.com","age":30}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, json!({"id":1,"name":"   ","email":"a@x.com","age":30}));
}

#[actix_web::test]
async fn unicode_email_is_accepted() {
    let app = app().await;

    let (status, created) =
        send(&app, create(json!({"name":"U","email":"ü@x.com","age":30}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["email"], "ü@x.com");
}

#[actix_web::test]
async fn malformed_json_is_a_validation_failure() {
    let app = app().await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/v1/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        envelope("ErrValidationFailed", "validation failed", 400)
    );
}

#[actix_web::test]
async fn update_may_keep_own_email() {
    let app = app().await;
    send(&app, create(json!({"name":"A","email":"a@x.com","age":30}))).await;

    let (status, body) =
        send(&app, update(json!({"id":1,"name":"A2","email":"a@x.com","age":31}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, fetched) = send(&app, test::TestRequest::get().uri("/v1/users/1")).await;
    assert_eq!(fetched, json!({"id":1,"name":"A2","email":"a@x.com","age":31}));
}

#[actix_web::test]
async fn update_to_another_users_email_conflicts() {
    let app = app().await;
    send(&app, create(json!({"name":"A","email":"a@x.com","age":30}))).await;
    send(&app, create(json!({"name":"B","email":"b@x.com","age":25}))).await;

    let (status, body) =
        send(&app, update(json!({"id":2,"name":"B","email":"a@x.com","age":25}))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        envelope("ErrUserAlreadyExists", "user already exists", 409)
    );

    let (_, unchanged) = send(&app, test::TestRequest::get().uri("/v1/users/2")).await;
    assert_eq!(unchanged["email"], "b@x.com");
}

#[rstest]
#[case(json!({"name":"A","email":"a@x.com","age":30}))]
#[case(json!({"id":0,"name":"A","email":"a@x.com","age":30}))]
#[actix_web::test]
async fn update_without_id_is_rejected(#[case] payload: Value) {
    let app = app().await;

    let (status, body) = send(&app, update(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        envelope("ErrValidationFailed", "validation failed", 400)
    );
}

#[actix_web::test]
async fn update_of_missing_user_is_not_found() {
    let app = app().await;

    let (status, body) =
        send(&app, update(json!({"id":7,"name":"A","email":"a@x.com","age":30}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, envelope("ErrUserNotFound", "user not found", 404));
}

#[actix_web::test]
async fn delete_is_not_idempotent() {
    let app = app().await;
    send(&app, create(json!({"name":"A","email":"a@x.com","age":30}))).await;

    let (first, first_body) = send(&app, test::TestRequest::delete().uri("/v1/users/1")).await;
    let (second, second_body) = send(&app, test::TestRequest::delete().uri("/v1/users/1")).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(first_body, Value::Null);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(
        second_body,
        envelope("ErrUserNotFound", "user not found", 404)
    );
}

#[actix_web::test]
async fn identifiers_are_not_reused_after_delete() {
    let app = app().await;
    send(&app, create(json!({"name":"A","email":"a@x.com","age":30}))).await;
    send(&app, test::TestRequest::delete().uri("/v1/users/1")).await;

    let (_, created) = send(&app, create(json!({"name":"A","email":"a@x.com","age":30}))).await;

    assert_eq!(created["id"], 2);
}

#[actix_web::test]
async fn error_responses_carry_a_trace_identifier() {
    let app = app().await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/v1/users/abc").to_request(),
    )
    .await;

    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .expect("trace id header");
    assert!(header.parse::<TraceId>().is_ok());
}
