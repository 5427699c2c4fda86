//! Users service entry-point: loads settings, connects the store and serves
//! the REST API until SIGTERM or Ctrl-C.

mod server;

use std::io;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_service::inbound::http::health::HealthState;
use users_service::outbound::persistence::{DbPool, PoolConfig};
use users_service::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    settings
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut config = ServerConfig::from_settings(&settings);
    if let Some(url) = settings.database_url() {
        let pool_config = PoolConfig::new(url)
            .with_max_size(settings.db_max_connections)
            .with_connection_timeout(settings.query_timeout());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| io::Error::other(e.to_string()))?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        let prometheus = PrometheusMetricsBuilder::new("users_service")
            .endpoint("/metrics")
            .build()
            .map_err(|e| io::Error::other(format!("configure Prometheus metrics: {e}")))?;
        config = config.with_metrics(prometheus);
    }

    let (host, port) = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%host, port, "users service listening");

    let handle = server.handle();
    tokio::spawn(async move {
        if let Err(e) = shutdown_signal().await {
            error!(error = %e, "failed to listen for shutdown signals");
            return;
        }
        info!("shutdown requested; draining in-flight requests");
        health_state.mark_unhealthy();
        handle.stop(true).await;
    });

    server.await?;
    info!("users service stopped");
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}
