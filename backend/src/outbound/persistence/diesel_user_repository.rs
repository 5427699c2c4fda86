//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Existence comes from affected-row counts and uniqueness from the
//! `users_email_key` constraint, both reported by the statement that performs
//! the mutation. Every operation, checkout included, runs under one deadline.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Age, EmailAddress, NewUser, User, UserId, UserName, UserValidationError};

use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    query_timeout: Duration,
}

impl DieselUserRepository {
    /// Create a new repository bounding each call by `query_timeout`.
    pub fn new(pool: DbPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, UserRepositoryError>
    where
        F: Future<Output = Result<T, UserRepositoryError>>,
    {
        let result = with_deadline(operation, self.query_timeout, fut).await;
        if let Err(error) = &result {
            debug!(operation, kind = error.kind(), "user repository call failed");
        }
        result
    }
}

/// Run `fut` under `timeout`; elapsing yields [`UserRepositoryError::Timeout`].
async fn with_deadline<T, F>(
    operation: &'static str,
    timeout: Duration,
    fut: F,
) -> Result<T, UserRepositoryError>
where
    F: Future<Output = Result<T, UserRepositoryError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            Err(UserRepositoryError::timeout(operation, timeout_ms))
        }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserRepositoryError::already_exists(info.constraint_name().unwrap_or("unknown"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection closed")
        }
        DieselError::DatabaseError(_, info) => UserRepositoryError::query(info.message()),
        other => UserRepositoryError::query(other.to_string()),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let id = row.id;
    let invalid = move |err: UserValidationError| {
        UserRepositoryError::query(format!("invalid stored user {id}: {err}"))
    };
    Ok(User {
        id: UserId::new(id),
        name: UserName::new(row.name).map_err(invalid)?,
        email: EmailAddress::new(row.email).map_err(invalid)?,
        age: Age::new(row.age).map_err(invalid)?,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        self.bounded("list", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<UserRow> = users::table
                .select(UserRow::as_select())
                .order(users::id.asc())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn get(&self, id: UserId) -> Result<User, UserRepositoryError> {
        self.bounded("get", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row: Option<UserRow> = users::table
                .find(id.get())
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
            match row {
                Some(row) => row_to_user(row),
                None => Err(UserRepositoryError::not_found(id.get())),
            }
        })
        .await
    }

    async fn create(&self, user: &NewUser) -> Result<UserId, UserRepositoryError> {
        self.bounded("create", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let new_row = NewUserRow {
                name: user.name.as_ref(),
                email: user.email.as_ref(),
                age: user.age.get(),
            };
            let id: i64 = diesel::insert_into(users::table)
                .values(&new_row)
                .returning(users::id)
                .get_result(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            Ok(UserId::new(id))
        })
        .await
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        self.bounded("update", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let changes = UserUpdate {
                name: user.name.as_ref(),
                email: user.email.as_ref(),
                age: user.age.get(),
            };
            let updated_rows = diesel::update(users::table.find(user.id.get()))
                .set(&changes)
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            if updated_rows == 0 {
                return Err(UserRepositoryError::not_found(user.id.get()));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError> {
        self.bounded("delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let deleted_rows = diesel::delete(users::table.find(id.get()))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            if deleted_rows == 0 {
                return Err(UserRepositoryError::not_found(id.get()));
            }
            Ok(())
        })
        .await
    }

    async fn ping(&self) -> Result<(), UserRepositoryError> {
        self.bounded("ping", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::sql_query("SELECT 1")
                .execute(&mut conn)
                .await
                .map(|_| ())
                .map_err(map_diesel_error)
        })
        .await
    }
}
