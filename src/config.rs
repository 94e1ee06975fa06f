//! Server configuration from environment variables (`.env` is loaded by the binary).

use crate::error::ConfigError;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/reservaciones";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEV_JWT_SECRET: &str = "dev-jwt-secret-not-for-production";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    /// development | production
    pub environment: String,
    /// (usuario, contrasena) of the administrator created on an empty database.
    pub admin_bootstrap: Option<(String, String)>,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let jwt_secret = match var("JWT_SECRET") {
            Some(s) => s,
            None if environment == "development" => {
                tracing::warn!("JWT_SECRET not set, using development secret");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let bind_address = match (var("BIND_ADDRESS"), var("PORT")) {
            (Some(addr), _) => addr,
            (None, Some(port)) => {
                let port: u16 = parse_var("PORT", &port)?;
                format!("0.0.0.0:{}", port)
            }
            (None, None) => DEFAULT_BIND_ADDRESS.to_string(),
        };

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let jwt_ttl_hours: i64 = match var("JWT_TTL_HOURS") {
            Some(v) => parse_var("JWT_TTL_HOURS", &v)?,
            None => 8,
        };
        if jwt_ttl_hours <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_TTL_HOURS",
                value: jwt_ttl_hours.to_string(),
            });
        }

        let db_max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(v) => parse_var("DB_MAX_CONNECTIONS", &v)?,
            None => 5,
        };
        let acquire_secs: u64 = match var("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(v) => parse_var("DB_ACQUIRE_TIMEOUT_SECS", &v)?,
            None => 5,
        };

        Ok(AppConfig {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_address,
            jwt_secret,
            jwt_ttl_hours,
            cors_origins,
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
            environment,
            admin_bootstrap: var("ADMIN_USUARIO").zip(var("ADMIN_CONTRASENA")),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_in_development() {
        let config = load(&[]).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_address, "0.0.0.0:3000");
        assert_eq!(config.jwt_ttl_hours, 8);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173".to_string()]);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
    }

    #[test]
    fn admin_bootstrap_needs_both_values() {
        assert!(load(&[("ADMIN_USUARIO", "admin")]).unwrap().admin_bootstrap.is_none());
        let config = load(&[("ADMIN_USUARIO", "admin"), ("ADMIN_CONTRASENA", "s3creta")]).unwrap();
        assert_eq!(config.admin_bootstrap, Some(("admin".to_string(), "s3creta".to_string())));
    }

    #[test]
    fn production_requires_secret() {
        let err = load(&[("ENVIRONMENT", "production")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn port_builds_bind_address() {
        let config = load(&[("PORT", "8081")]).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8081");
    }

    #[test]
    fn bind_address_wins_over_port() {
        let config = load(&[("PORT", "8081"), ("BIND_ADDRESS", "127.0.0.1:9000")]).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn cors_list_is_split_and_trimmed() {
        let config = load(&[("CORS_ORIGINS", "http://a.test, http://b.test ,")]).unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(matches!(
            load(&[("JWT_TTL_HOURS", "eight")]).unwrap_err(),
            ConfigError::Invalid { name: "JWT_TTL_HOURS", .. }
        ));
        assert!(load(&[("JWT_TTL_HOURS", "0")]).is_err());
        assert!(load(&[("PORT", "99999")]).is_err());
    }
}
