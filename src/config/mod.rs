//! Runtime configuration from environment variables.

mod loader;
pub use loader::{load_from_env, load_with};

use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/schedule";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Contains credentials; never log it.
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub cors_origins: CorsOrigins,
    pub max_body_bytes: usize,
}
