//! Read [`GatewayConfig`] from `DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS`,
//! `DB_ACQUIRE_TIMEOUT_SECS`, `CORS_ALLOWED_ORIGINS` and `MAX_BODY_BYTES`.

use super::{CorsOrigins, GatewayConfig, DEFAULT_BIND_ADDR, DEFAULT_DATABASE_URL};
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Load `.env` if present, then read the process environment.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_with(|key| std::env::var(key).ok())
}

/// Build config from any key lookup; unset keys take their defaults.
pub fn load_with<F>(lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
    let bind_addr: SocketAddr = parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())?;
    let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", Some(5u32))?;
    if max_connections == 0 {
        return Err(ConfigError::Invalid {
            var: "DB_MAX_CONNECTIONS",
            reason: "must be at least 1".into(),
        });
    }
    let acquire_secs = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", Some(5u64))?;
    let max_body_bytes = parse_or(&lookup, "MAX_BODY_BYTES", Some(64 * 1024usize))?;
    let cors_origins = cors_origins(lookup("CORS_ALLOWED_ORIGINS").as_deref());

    Ok(GatewayConfig {
        database_url,
        bind_addr,
        max_connections,
        acquire_timeout: Duration::from_secs(acquire_secs),
        cors_origins,
        max_body_bytes,
    })
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => default.ok_or(ConfigError::Invalid {
            var,
            reason: "no default".into(),
        }),
    }
}

fn cors_origins(raw: Option<&str>) -> CorsOrigins {
    let Some(raw) = raw else { return CorsOrigins::Any };
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}
