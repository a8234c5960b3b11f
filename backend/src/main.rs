//! Backend entry-point: loads settings, resolves the datasource, and serves
//! the REST and GraphQL surfaces.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_directory::inbound::http::health::HealthState;
use user_directory::outbound::build_datasource;
use user_directory::settings::AppSettings;

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
    let kind = settings.datasource_kind().map_err(std::io::Error::other)?;
    let datasource = build_datasource(kind, settings.redis_url())
        .await
        .map_err(|e| std::io::Error::other(format!("datasource initialisation failed: {e}")))?;
    info!(datasource = %kind, "datasource ready");

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, settings.gql_path(), datasource);
    let server = create_server(health_state, config)?;
    server.await
}
