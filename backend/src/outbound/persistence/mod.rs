//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Diesel row structs (`models.rs`) and schema definitions (`schema.rs`) are
//! internal; only the pool, the repository and the migration runner are
//! exposed.
//!
//! ```no_run
//! use std::time::Duration;
//! use users_service::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), users_service::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool, Duration::from_secs(5));
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
