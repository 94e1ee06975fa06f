//! Shared application state for all routes.

use crate::auth::JwtKeys;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Signing and verification keys plus token lifetime, built once from config.
    pub auth: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(pool: PgPool, auth: JwtKeys) -> Self {
        AppState {
            pool,
            auth: Arc::new(auth),
        }
    }
}
