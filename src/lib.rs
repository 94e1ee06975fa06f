//! Reservaciones API: restaurant tables, time slots, reservations, staff, and
//! users over PostgreSQL, with bearer-token authentication.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use response::{success_many, success_one_ok};
pub use routes::{app, common_routes, ApiDoc};
pub use state::AppState;
pub use store::{ensure_admin, ensure_database_exists, ensure_schema};
