//! Shared validation helpers for inbound HTTP adapters.
//!
//! Failures carry the offending field in the diagnostic message; clients only
//! ever see the fixed validation envelope.

use actix_web::web;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{Error, UserId, UserValidationError};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, reason: UserValidationError) -> Error {
    Error::validation_failed(format!("{}: {reason}", field.as_str()))
}

/// Unwrap an optional payload field, reporting `missing` when absent.
pub(crate) fn required<T>(
    value: Option<T>,
    field: FieldName,
    missing: UserValidationError,
) -> Result<T, Error> {
    value.ok_or_else(|| field_error(field, missing))
}

/// Parse a path segment as a user identifier.
pub(crate) fn parse_path_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<i64>()
        .map(UserId::new)
        .map_err(|err| Error::invalid_id(format!("path id {raw:?}: {err}")))
}

/// Request body as extracted: a JSON object and nothing else.
pub(crate) type JsonObject = Map<String, Value>;

/// Decode a payload struct from a JSON object.
///
/// Serde's derived struct visitors also accept sequences, so bodies are
/// extracted as [`JsonObject`] first and only then typed.
pub(crate) fn decode_object<T: DeserializeOwned>(body: JsonObject) -> Result<T, Error> {
    serde_json::from_value(Value::Object(body))
        .map_err(|err| Error::validation_failed(format!("request body: {err}")))
}

/// JSON extractor configuration turning every body failure into a validation
/// error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejecting request body");
        Error::validation_failed(format!("request body: {err}")).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("+7", 7)]
    #[case("-3", -3)]
    #[case("0", 0)]
    fn parses_integer_path_ids(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_path_id(raw).map(UserId::get), Ok(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    #[case("99999999999999999999")]
    fn rejects_non_integer_path_ids(#[case] raw: &str) {
        let err = parse_path_id(raw).expect_err("not an integer");
        assert_eq!(err.code(), ErrorCode::InvalidId);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        #[serde(default)]
        name: Option<String>,
    }

    #[rstest]
    fn decodes_objects_ignoring_unknown_fields() {
        let body = serde_json::json!({"name": "A", "extra": true});
        let Value::Object(map) = body else {
            panic!("object literal");
        };

        let payload: Payload = decode_object(map).expect("object decodes");

        assert_eq!(payload.name.as_deref(), Some("A"));
    }

    #[rstest]
    fn wrongly_typed_fields_are_validation_failures() {
        let body = serde_json::json!({"name": 5});
        let Value::Object(map) = body else {
            panic!("object literal");
        };

        let err = decode_object::<Payload>(map).expect_err("name must be a string");

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[rstest]
    fn missing_field_names_the_field() {
        let err = required::<String>(None, FieldName::new("email"), UserValidationError::MissingEmail)
            .expect_err("absent");

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(err.message(), "email: email is required");
    }
}
