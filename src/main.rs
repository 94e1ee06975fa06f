//! Server binary: loads `.env`, ensures the database and schema exist, mounts the router.

use reservaciones_api::auth::JwtKeys;
use reservaciones_api::{app, ensure_admin, ensure_database_exists, ensure_schema, AppConfig, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("reservaciones_api=info".parse()?))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(environment = %config.environment, "starting");

    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await?;

    ensure_schema(&pool).await?;
    if let Some((usuario, contrasena)) = &config.admin_bootstrap {
        let mut conn = pool.acquire().await?;
        ensure_admin(&mut conn, usuario, contrasena).await?;
    }

    let state = AppState::new(pool, JwtKeys::new(&config.jwt_secret, config.jwt_ttl_hours));
    let router = app(state, &config);

    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
