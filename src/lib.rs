//! Schedule gateway: REST facade over the users, clients, services, appointments and
//! appointment_services tables.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod table;

pub use config::{load_from_env, GatewayConfig};
pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes, schedule_routes};
pub use service::ScheduleStore;
pub use state::AppState;
pub use store::{connect, PgScheduleStore};
pub use table::Table;
