//! Builders for the HTTP state from the configured store.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use users_service::domain::UsersService;
use users_service::inbound::http::state::HttpState;
use users_service::outbound::memory::InMemoryUserRepository;
use users_service::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Wire the users service over PostgreSQL when a pool is configured,
/// otherwise over the in-memory store.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!(
                query_timeout_ms = u64::try_from(config.query_timeout.as_millis()).unwrap_or(u64::MAX),
                "using PostgreSQL user repository"
            );
            let repository = DieselUserRepository::new(pool.clone(), config.query_timeout);
            HttpState::from_service(UsersService::new(Arc::new(repository)))
        }
        None => {
            warn!("no database URL configured; users are kept in memory and lost on restart");
            HttpState::from_service(UsersService::new(Arc::new(InMemoryUserRepository::new())))
        }
    };
    web::Data::new(state)
}
