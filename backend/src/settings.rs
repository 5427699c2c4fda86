//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USERS_*` environment variables and an
//! optional configuration file, over the defaults declared on each field.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Settings that cannot drive a working server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A count or duration that must be positive was zero.
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

/// Process configuration for the users service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct ServiceSettings {
    /// Interface to bind.
    #[ortho_config(default = String::from("0.0.0.0"))]
    pub host: String,
    /// TCP port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL connection URL. Without it the service keeps users in
    /// memory.
    pub database_url: Option<String>,
    /// Deadline for each repository call, pool checkout included.
    #[ortho_config(default = 5_000)]
    pub query_timeout_ms: u64,
    /// Grace period for in-flight requests on shutdown.
    #[ortho_config(default = 5)]
    pub shutdown_timeout_secs: u64,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

impl std::fmt::Debug for ServiceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("query_timeout_ms", &self.query_timeout_ms)
            .field("shutdown_timeout_secs", &self.shutdown_timeout_secs)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

impl ServiceSettings {
    /// Reject values the pool builder cannot accept.
    ///
    /// # Errors
    /// Returns [`SettingsError::Zero`] naming the first zero-valued setting.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.query_timeout_ms == 0 {
            return Err(SettingsError::Zero {
                name: "query_timeout_ms",
            });
        }
        if self.db_max_connections == 0 {
            return Err(SettingsError::Zero {
                name: "db_max_connections",
            });
        }
        Ok(())
    }

    /// `(host, port)` pair for `HttpServer::bind`.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
