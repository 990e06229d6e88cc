//! Backend entry-point: loads settings, migrates the schema, and serves the
//! records REST API with its health probes and OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use records_backend::inbound::http::health::HealthState;
use records_backend::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use records_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn migrate(database_url: &str) -> color_eyre::Result<()> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_migrations(&url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("schema migration failed")?;
    info!(applied, "database schema up to date");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let database_url = settings
        .database_url
        .clone()
        .ok_or_else(|| eyre!("RECORDS_DATABASE_URL (or --database-url) must be set"))?;

    if settings.run_migrations {
        migrate(&database_url).await?;
    }

    let mut pool_config = PoolConfig::new(database_url);
    if let Some(max_size) = settings.pool_max_size {
        pool_config = pool_config.with_max_size(max_size);
    }
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;

    let config = ServerConfig::new(settings.bind_addr(), settings.cors_origin(), pool);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome?;
    Ok(())
}
