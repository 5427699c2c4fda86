//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each
//! [`ErrorCode`] onto a fixed status and public message; the free-form
//! `message` carried here is diagnostic detail for logs only.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TraceId;

/// Closed set of failure categories understood across the tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ErrorCode {
    /// The request payload is malformed or fails validation.
    #[serde(rename = "ErrValidationFailed")]
    ValidationFailed,
    /// A path identifier is not an integer.
    #[serde(rename = "ErrInvalidID")]
    InvalidId,
    /// No user matches the identifier.
    #[serde(rename = "ErrUserNotFound")]
    NotFound,
    /// The email is already held by another user.
    #[serde(rename = "ErrUserAlreadyExists")]
    AlreadyExists,
    /// Any failure not covered by the categories above.
    #[serde(rename = "ErrInternalServer")]
    InternalError,
}

impl ErrorCode {
    /// Stable wire identifier for this code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "ErrValidationFailed",
            Self::InvalidId => "ErrInvalidID",
            Self::NotFound => "ErrUserNotFound",
            Self::AlreadyExists => "ErrUserAlreadyExists",
            Self::InternalError => "ErrInternalServer",
        }
    }

    /// Public message shown to clients for this code.
    pub fn public_message(self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation failed",
            Self::InvalidId => "invalid id",
            Self::NotFound => "user not found",
            Self::AlreadyExists => "user already exists",
            Self::InternalError => "internal server error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload.
///
/// The trace identifier of the enclosing request, when there is one, is
/// captured at construction time so adapters can correlate log lines.
///
/// # Examples
/// ```
/// use users_service::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("user 7 does not exist");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "user 7 does not exist");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<TraceId>,
}

impl Error {
    /// Create a new error, falling back to the public message when `message`
    /// is blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.public_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Diagnostic message. Never sent to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier of the request that produced the error.
    pub fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`].
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidId`].
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidId, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::AlreadyExists`].
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyExists, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}
