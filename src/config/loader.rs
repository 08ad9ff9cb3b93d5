//! Load server and backend settings from the process environment (after `.env`).

use crate::config::types::{Backend, BackendDescriptor, PoolSettings, ServerConfig};
use crate::config::validate_descriptor;
use crate::error::ConfigError;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 9001;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static placeholder pattern"))
}

/// Replace `${NAME}` with the value `lookup` returns for NAME. Unknown names are left as-is.
pub fn resolve_placeholders<F>(value: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    placeholder_re()
        .replace_all(value, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Load config from the real environment. Call `dotenvy::dotenv()` first to pick up `.env`.
pub fn load_from_env() -> Result<ServerConfig, ConfigError> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load config through an arbitrary key lookup.
pub fn load_from_lookup<F>(lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| -> Option<String> {
        lookup(key)
            .map(|v| resolve_placeholders(&v, &lookup))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let backend: Backend = match get("DB_BACKEND") {
        Some(s) => s.parse()?,
        None => Backend::Postgres,
    };
    let specific_url_key = match backend {
        Backend::Postgres => "POSTGRES_DB_URL",
        Backend::Sqlite => "SQLITE_DB_URL",
    };
    let url = get("DB_URL")
        .or_else(|| get(specific_url_key))
        .ok_or(ConfigError::Missing("DB_URL"))?;

    let defaults = PoolSettings::default();
    let pool = PoolSettings {
        max_connections: parse_or("DB_POOL_MAX", get("DB_POOL_MAX"), defaults.max_connections)?,
        min_connections: parse_or("DB_POOL_MIN", get("DB_POOL_MIN"), defaults.min_connections)?,
        acquire_timeout: Duration::from_millis(parse_or(
            "DB_ACQUIRE_TIMEOUT_MS",
            get("DB_ACQUIRE_TIMEOUT_MS"),
            defaults.acquire_timeout.as_millis() as u64,
        )?),
        idle_timeout: optional_millis("DB_IDLE_TIMEOUT_MS", get("DB_IDLE_TIMEOUT_MS"), defaults.idle_timeout)?,
        max_lifetime: optional_millis("DB_MAX_LIFETIME_MS", get("DB_MAX_LIFETIME_MS"), defaults.max_lifetime)?,
    };

    let database = BackendDescriptor {
        backend,
        url,
        user: get("DB_USER"),
        password: get("DB_PASSWORD"),
        pool,
    };
    validate_descriptor(&database)?;

    Ok(ServerConfig {
        host: get("HTTP_HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.into()),
        port: parse_or("HTTP_PORT", get("HTTP_PORT"), DEFAULT_HTTP_PORT)?,
        body_limit: parse_or("HTTP_BODY_LIMIT", get("HTTP_BODY_LIMIT"), DEFAULT_BODY_LIMIT)?,
        database,
    })
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(s) => s.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// `0` disables the timeout.
fn optional_millis(
    key: &'static str,
    raw: Option<String>,
    default: Option<Duration>,
) -> Result<Option<Duration>, ConfigError> {
    match raw {
        Some(_) => {
            let ms: u64 = parse_or(key, raw, 0)?;
            Ok((ms > 0).then(|| Duration::from_millis(ms)))
        }
        None => Ok(default),
    }
}
