//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user and return it with its assigned identifier.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Full replace of an existing user.
    async fn update_user(&self, user: User) -> Result<(), Error>;

    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
