//! Driven port for user persistence adapters and their errors.
//!
//! Adapters derive existence and uniqueness from store-native signals
//! (affected-row counts, constraint violations) inside the same statement as
//! the mutation; they never pre-check.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// No row matches the identifier.
        NotFound { id: i64 } => "user {id} not found",
        /// A uniqueness constraint rejected the write.
        AlreadyExists { constraint: String } => "unique constraint {constraint} violated",
        /// The store could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The operation exceeded the configured deadline.
        Timeout { operation: String, timeout_ms: u64 } =>
            "user repository {operation} timed out after {timeout_ms} ms",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user, ordered by identifier.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Fetch one user, or [`UserRepositoryError::NotFound`].
    async fn get(&self, id: UserId) -> Result<User, UserRepositoryError>;

    /// Persist a new user and return the identifier the store assigned.
    async fn create(&self, user: &NewUser) -> Result<UserId, UserRepositoryError>;

    /// Replace name, email and age of the row keyed by `user.id`.
    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Hard-delete the row.
    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError>;

    /// Cheap round trip proving the store is reachable.
    async fn ping(&self) -> Result<(), UserRepositoryError>;
}
