use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use tourdesk_application::DEFAULT_PERMISSION_BATCH_SIZE;
use tourdesk_core::AppError;
use tourdesk_domain::{DEFAULT_ROLE, RoleName};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Migrate,
    Seed,
}

#[derive(Debug, Clone)]
pub enum StorageConfig {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub enum IdentityProviderConfig {
    Firebase { api_key: String, base_url: String },
    Static { tokens: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub command: Command,
    pub storage: StorageConfig,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub identity_provider: IdentityProviderConfig,
    pub default_user_role: RoleName,
    pub permission_lookup_batch_size: usize,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let command = match env::args().nth(1).as_deref() {
            Some("migrate") => Command::Migrate,
            Some("seed") => Command::Seed,
            _ => Command::Serve,
        };

        let storage = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_owned())
            .as_str()
        {
            "postgres" => StorageConfig::Postgres {
                database_url: required_non_empty_env("DATABASE_URL")?,
            },
            "memory" => StorageConfig::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "STORAGE_BACKEND must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let identity_provider = match env::var("IDENTITY_PROVIDER")
            .unwrap_or_else(|_| "firebase".to_owned())
            .as_str()
        {
            "firebase" => IdentityProviderConfig::Firebase {
                api_key: required_non_empty_env("FIREBASE_API_KEY")?,
                base_url: env::var("FIREBASE_IDENTITY_BASE_URL")
                    .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com".to_owned()),
            },
            "static" => IdentityProviderConfig::Static {
                tokens: required_non_empty_env("STATIC_IDENTITY_TOKENS")?,
            },
            other => {
                return Err(AppError::Validation(format!(
                    "IDENTITY_PROVIDER must be either 'firebase' or 'static', got '{other}'"
                )));
            }
        };

        let default_user_role = RoleName::new(
            env::var("DEFAULT_USER_ROLE").unwrap_or_else(|_| DEFAULT_ROLE.to_owned()),
        )
        .map_err(|error| AppError::Validation(format!("invalid DEFAULT_USER_ROLE: {error}")))?;

        let permission_lookup_batch_size = match env::var("PERMISSION_LOOKUP_BATCH_SIZE") {
            Ok(value) => parse_batch_size(value.as_str())?,
            Err(_) => DEFAULT_PERMISSION_BATCH_SIZE,
        };

        Ok(Self {
            command,
            storage,
            frontend_url,
            api_host,
            api_port,
            identity_provider,
            default_user_role,
            permission_lookup_batch_size,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_batch_size(value: &str) -> Result<usize, AppError> {
    match value.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(AppError::Validation(format!(
            "PERMISSION_LOOKUP_BATCH_SIZE must be a positive integer, got '{value}'"
        ))),
    }
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
