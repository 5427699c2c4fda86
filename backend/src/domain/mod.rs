//! Domain primitives, errors and services.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure taxonomy.
//! - User, NewUser and their field newtypes.
//! - TraceId: per-request correlation identifier.
//! - UsersService: the service tier behind the driving ports.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod users_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Age, EmailAddress, NewUser, User, UserId, UserName, UserValidationError};
pub use self::users_service::UsersService;

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use users_service::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("user 1 not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
