//! In-process `UserRepository` with the same existence and uniqueness
//! semantics as the PostgreSQL adapter.
//!
//! Every check happens inside the critical section that performs the
//! mutation, so concurrent writers cannot both claim one email.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserId};

/// Constraint name reported for duplicate emails, matching the migration.
pub const EMAIL_CONSTRAINT: &str = "users_email_key";

#[derive(Debug, Default)]
struct State {
    rows: BTreeMap<UserId, User>,
    last_id: i64,
}

impl State {
    fn email_taken_by_other(&self, email: &str, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|row| row.email.as_ref() == email && Some(row.id) != except)
    }
}

/// Mutex-guarded map of users keyed by a monotonically assigned identifier.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<State>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, UserRepositoryError> {
        self.state
            .lock()
            .map_err(|_| UserRepositoryError::query("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn get(&self, id: UserId) -> Result<User, UserRepositoryError> {
        self.lock()?
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| UserRepositoryError::not_found(id.get()))
    }

    async fn create(&self, user: &NewUser) -> Result<UserId, UserRepositoryError> {
        let mut state = self.lock()?;
        if state.email_taken_by_other(user.email.as_ref(), None) {
            return Err(UserRepositoryError::already_exists(EMAIL_CONSTRAINT));
        }
        state.last_id += 1;
        let id = UserId::new(state.last_id);
        state.rows.insert(id, user.clone().with_id(id));
        Ok(id)
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut state = self.lock()?;
        if !state.rows.contains_key(&user.id) {
            return Err(UserRepositoryError::not_found(user.id.get()));
        }
        if state.email_taken_by_other(user.email.as_ref(), Some(user.id)) {
            return Err(UserRepositoryError::already_exists(EMAIL_CONSTRAINT));
        }
        state.rows.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError> {
        self.lock()?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| UserRepositoryError::not_found(id.get()))
    }

    async fn ping(&self) -> Result<(), UserRepositoryError> {
        self.lock().map(|_| ())
    }
}
