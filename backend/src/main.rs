//! Backend entry-point: loads settings, prepares persistence and serves the
//! campground pages.

mod server;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let key = settings.session_key().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(key, settings.cookie_secure(), bind_addr);

    if let Some(database_url) = settings.database_url.as_deref() {
        let pool_config = PoolConfig::new(database_url).with_max_size(settings.db_pool_size());
        run_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        info!(database = %pool_config.redacted_url(), "connecting to database");
        let pool = DbPool::connect(&pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    if let Some(geocoder) = settings.geocoder().map_err(std::io::Error::other)? {
        config = config.with_geocoder(geocoder);
    }

    info!(%bind_addr, "starting YelpCamp server");
    let server = create_server(config)?;
    server.await
}
