//! HTTP adapter mapping for domain errors.
//!
//! Every [`ErrorCode`] maps onto one fixed status and public message. The
//! diagnostic message carried by the domain error is logged here and never
//! written to the response body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Error envelope returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "ErrUserNotFound")]
    pub error_code: ErrorCode,
    #[schema(example = "user not found")]
    pub error_message: String,
    #[schema(example = 404)]
    pub status: u16,
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        let code = error.code();
        Self {
            error_code: code,
            error_message: code.public_message().to_owned(),
            status: status_for(code).as_u16(),
        }
    }
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::InvalidId => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::AlreadyExists => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_failure(err: &Error) {
    let code = err.code();
    let trace_id = err.trace_id().map(|id| id.to_string());
    match code {
        ErrorCode::NotFound => {
            debug!(%code, detail = err.message(), trace_id = trace_id.as_deref(), "request failed");
        }
        ErrorCode::ValidationFailed | ErrorCode::InvalidId | ErrorCode::AlreadyExists => {
            warn!(%code, detail = err.message(), trace_id = trace_id.as_deref(), "request failed");
        }
        ErrorCode::InternalError => {
            error!(%code, detail = err.message(), trace_id = trace_id.as_deref(), "request failed");
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        log_failure(self);
        HttpResponse::build(self.status_code()).json(ErrorResponse::from(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests;
