//! Process configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first if present; real
//! environment variables win over it.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { database_url: String, max_connections: u32 },
    Memory,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
    pub log_filter: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: bind_addr.clone(),
                reason: err.to_string(),
            })?;

        let storage = match lookup("STORAGE").as_deref() {
            None | Some("postgres") => {
                let database_url =
                    lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let max_connections = match lookup("DB_MAX_CONNECTIONS") {
                    Some(raw) => parse_pool_size(&raw)?,
                    None => default_pool_size(),
                };
                StorageBackend::Postgres {
                    database_url,
                    max_connections,
                }
            }
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE",
                    value: other.to_string(),
                    reason: "expected `postgres` or `memory`".to_string(),
                })
            }
        };

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            bind_addr,
            storage,
            log_filter,
        })
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    match raw.parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        Ok(_) => Err(ConfigError::Invalid {
            name: "DB_MAX_CONNECTIONS",
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Err(err) => Err(ConfigError::Invalid {
            name: "DB_MAX_CONNECTIONS",
            value: raw.to_string(),
            reason: err.to_string(),
        }),
    }
}

fn default_pool_size() -> u32 {
    (num_cpus::get() * 2) as u32
}
