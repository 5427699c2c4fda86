//! Driving port for user reads.
//!
//! Inbound adapters use this port to fetch users without importing outbound
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users; empty when the store holds none.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// One user by identifier.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;

    /// Report whether the backing store answers.
    async fn ping(&self) -> Result<(), Error>;
}
