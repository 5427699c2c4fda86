//! Apply the embedded schema migrations to the configured database.
//!
//! Reads the same `USERS_*` settings as the server; `USERS_DATABASE_URL` is
//! required here.

use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use users_service::outbound::persistence::run_pending_migrations;
use users_service::settings::ServiceSettings;

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let url = settings
        .database_url()
        .ok_or_else(|| eyre!("USERS_DATABASE_URL must be set to run migrations"))?;

    let applied = run_pending_migrations(url).wrap_err("schema migration failed")?;
    if applied.is_empty() {
        info!("schema already up to date");
    }
    for version in applied {
        info!(%version, "applied migration");
    }
    Ok(())
}
