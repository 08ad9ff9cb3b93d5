//! Backend descriptor and server settings.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::time::Duration;

/// Storage backend served by the connection pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Postgres => "postgres",
            Backend::Sqlite => "sqlite",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(ConfigError::Invalid {
                key: "DB_BACKEND",
                reason: format!("unknown backend '{}' (expected postgres or sqlite)", s),
            }),
        }
    }
}

/// Pool sizing and timeouts. `None` disables the corresponding reaping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl Default for PoolSettings {
    fn default() -> Self {
        PoolSettings {
            max_connections: 15,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(20),
            idle_timeout: Some(Duration::from_secs(300)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

/// Everything the connection pool needs to reach one backend.
#[derive(Clone, Debug)]
pub struct BackendDescriptor {
    pub backend: Backend,
    pub url: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub pool: PoolSettings,
}

impl BackendDescriptor {
    pub fn new(backend: Backend, url: impl Into<String>) -> Self {
        BackendDescriptor {
            backend,
            url: url.into(),
            user: None,
            password: None,
            pool: PoolSettings::default(),
        }
    }

    /// Private in-memory SQLite database. A single connection that is never reaped,
    /// since every SQLite memory connection owns its own database.
    pub fn sqlite_memory() -> Self {
        BackendDescriptor {
            backend: Backend::Sqlite,
            url: "sqlite::memory:".into(),
            user: None,
            password: None,
            pool: PoolSettings {
                max_connections: 1,
                min_connections: 1,
                acquire_timeout: Duration::from_secs(5),
                idle_timeout: None,
                max_lifetime: None,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub body_limit: usize,
    pub database: BackendDescriptor,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "HTTP_HOST",
                reason: e.to_string(),
            })
    }
}
