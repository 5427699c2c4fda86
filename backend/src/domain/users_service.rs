//! User domain service.
//!
//! Implements the driving ports over one [`UserRepository`], re-typing
//! repository errors into domain [`Error`]s so inbound adapters never see
//! persistence-specific failures.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserId};

/// User service implementing [`UsersQuery`] and [`UsersCommand`].
pub struct UsersService<R> {
    repository: Arc<R>,
}

impl<R> Clone for UsersService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> UsersService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::NotFound { .. } => Error::not_found(error.to_string()),
        UserRepositoryError::AlreadyExists { .. } => Error::already_exists(error.to_string()),
        UserRepositoryError::Connection { .. }
        | UserRepositoryError::Query { .. }
        | UserRepositoryError::Timeout { .. } => Error::internal(error.to_string()),
    }
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository.list().await.map_err(map_repository_error)
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.repository.get(id).await.map_err(map_repository_error)
    }

    async fn ping(&self) -> Result<(), Error> {
        self.repository.ping().await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> UsersCommand for UsersService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        let id = self
            .repository
            .create(&user)
            .await
            .map_err(map_repository_error)?;
        Ok(user.with_id(id))
    }

    async fn update_user(&self, user: User) -> Result<(), Error> {
        self.repository
            .update(&user)
            .await
            .map_err(map_repository_error)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "users_service_tests.rs"]
mod tests;
