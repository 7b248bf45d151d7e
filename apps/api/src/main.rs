//! Tourdesk API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod catalog_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use tourdesk_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, Command, StorageConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = match &config.storage {
        StorageConfig::Postgres { database_url } => {
            Some(api_services::connect_and_migrate(database_url).await?)
        }
        StorageConfig::Memory => None,
    };

    if config.command == Command::Migrate {
        info!("migrate command finished");
        return Ok(());
    }

    let app_state =
        api_services::build_app_state(api_services::build_repository_set(pool.as_ref()), &config)?;

    if config.command == Command::Seed || pool.is_none() {
        catalog_seed::run(&app_state).await?;
    }

    if config.command == Command::Seed {
        return Ok(());
    }

    let app = api_router::build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "tourdesk-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
