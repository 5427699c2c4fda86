//! Tests for the error envelope and status mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

async fn render(error: Error) -> (StatusCode, Value) {
    let response = error.error_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("error body is readable");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, body)
}

#[rstest]
#[case(Error::validation_failed("name: empty"), 400, "ErrValidationFailed", "validation failed")]
#[case(Error::invalid_id("\"abc\""), 400, "ErrInvalidID", "invalid id")]
#[case(Error::not_found("user 9 not found"), 404, "ErrUserNotFound", "user not found")]
#[case(Error::already_exists("dup"), 409, "ErrUserAlreadyExists", "user already exists")]
#[case(Error::internal("pool exhausted"), 500, "ErrInternalServer", "internal server error")]
#[actix_web::test]
async fn renders_fixed_envelope(
    #[case] error: Error,
    #[case] status: u16,
    #[case] code: &str,
    #[case] message: &str,
) {
    let (actual_status, body) = render(error).await;

    assert_eq!(actual_status.as_u16(), status);
    assert_eq!(
        body,
        json!({"error_code": code, "error_message": message, "status": status})
    );
}

#[rstest]
#[actix_web::test]
async fn internal_detail_never_reaches_the_body() {
    let (_, body) = render(Error::internal("password authentication failed")).await;

    assert!(!body.to_string().contains("password"));
}

#[rstest]
fn envelope_deserialises() {
    let parsed: ErrorResponse = serde_json::from_value(json!({
        "error_code": "ErrUserAlreadyExists",
        "error_message": "user already exists",
        "status": 409
    }))
    .expect("envelope parses");

    assert_eq!(parsed.error_code, ErrorCode::AlreadyExists);
    assert_eq!(parsed.status, 409);
}

#[test]
fn from_actix_error_is_internal() {
    let actix_err = actix_web::error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.trace_id(), None);
}
