//! Server settings read from the environment (`.env` is loaded by the binary).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Which backing store to run against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::Invalid {
                key: "RESOURCE_STORE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
    /// Maximum accepted request body size in bytes.
    pub body_limit: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `DATABASE_URL` is required only for the PostgreSQL store.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&get, "PORT", DEFAULT_PORT)?;
        let body_limit = parse_or(&get, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT)?;
        let kind = match get("RESOURCE_STORE") {
            Some(s) => s.parse()?,
            None => StoreKind::Postgres,
        };
        let store = match kind {
            StoreKind::Memory => StoreConfig::Memory,
            StoreKind::Postgres => StoreConfig::Postgres {
                database_url: get("DATABASE_URL")
                    .filter(|s| !s.trim().is_empty())
                    .ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            },
        };
        Ok(ServerConfig {
            host,
            port,
            store,
            body_limit,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(get: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(key) {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}
