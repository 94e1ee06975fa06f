//! Database bootstrap: create the database if missing, idempotent DDL, reference rows, first administrator.

use crate::auth::hash_password;
use crate::error::AppError;
use crate::models::{ESTADO_ACTIVO, TIPO_ADMIN, TIPO_CLIENTE};
use sqlx::ConnectOptions;
use sqlx::{PgConnection, PgPool};
use std::str::FromStr;

/// Tables in dependency order. Every statement is `IF NOT EXISTS` so startup can run it each time.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS tipo_usuario (
        pk_id_tipo SERIAL PRIMARY KEY,
        nombre TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS usuarios (
        pk_id_usuario SERIAL PRIMARY KEY,
        fk_tipo INT NOT NULL REFERENCES tipo_usuario (pk_id_tipo),
        nombre TEXT NOT NULL,
        apellido TEXT,
        correo TEXT,
        telefono TEXT,
        usuario TEXT UNIQUE,
        contrasena TEXT,
        estado SMALLINT NOT NULL DEFAULT 1
    )
    "#,
    "CREATE INDEX IF NOT EXISTS usuarios_nombre_telefono_idx ON usuarios (nombre, telefono)",
    r#"
    CREATE TABLE IF NOT EXISTS empleados (
        pk_id_empleado SERIAL PRIMARY KEY,
        fk_usuario INT NOT NULL UNIQUE REFERENCES usuarios (pk_id_usuario),
        fecha_nacimiento DATE,
        direccion TEXT,
        curp TEXT,
        rfc TEXT,
        salario DOUBLE PRECISION,
        estado SMALLINT NOT NULL DEFAULT 1
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS mesas (
        pk_id_mesa SERIAL PRIMARY KEY,
        numero_mesa INT NOT NULL,
        seccion_mesa TEXT NOT NULL,
        capacidad INT NOT NULL,
        estado TEXT NOT NULL DEFAULT 'Disponible'
            CHECK (estado IN ('Disponible', 'Ocupado', 'Eliminada'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS horarios (
        pk_id_horario SERIAL PRIMARY KEY,
        hora TIME NOT NULL,
        estado TEXT NOT NULL DEFAULT 'Disponible'
            CHECK (estado IN ('Disponible', 'Ocupado', 'Eliminado'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reservaciones (
        pk_id_reservacion SERIAL PRIMARY KEY,
        fk_usuario INT NOT NULL REFERENCES usuarios (pk_id_usuario),
        fk_mesa INT NOT NULL REFERENCES mesas (pk_id_mesa),
        fk_horario INT NOT NULL REFERENCES horarios (pk_id_horario),
        fecha DATE NOT NULL,
        comensales INT NOT NULL,
        comentario TEXT,
        estatus TEXT NOT NULL DEFAULT 'Activo'
            CHECK (estatus IN ('Activo', 'Cancelada'))
    )
    "#,
];

/// Create tables and seed the two built-in roles.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }

    for (id, nombre) in [(TIPO_ADMIN, "admin"), (TIPO_CLIENTE, "cliente")] {
        sqlx::query("INSERT INTO tipo_usuario (pk_id_tipo, nombre) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(id)
            .bind(nombre)
            .execute(pool)
            .await?;
    }
    // Explicit ids above do not advance the SERIAL sequence.
    sqlx::query(
        "SELECT setval(pg_get_serial_sequence('tipo_usuario', 'pk_id_tipo'), (SELECT MAX(pk_id_tipo) FROM tipo_usuario))",
    )
    .execute(pool)
    .await?;

    tracing::info!("database schema ready");
    Ok(())
}

/// Make sure someone can log in as administrator. When no active admin exists,
/// the given login is created, or restored as an active admin with the given
/// password if that login already exists.
pub async fn ensure_admin(conn: &mut PgConnection, usuario: &str, contrasena: &str) -> Result<bool, AppError> {
    let existing: Option<(i32,)> = sqlx::query_as(
        "SELECT pk_id_usuario FROM usuarios WHERE fk_tipo = $1 AND estado = $2 LIMIT 1",
    )
    .bind(TIPO_ADMIN)
    .bind(ESTADO_ACTIVO)
    .fetch_optional(&mut *conn)
    .await?;
    if existing.is_some() {
        return Ok(false);
    }

    let hash = hash_password(contrasena).await?;
    sqlx::query(
        "INSERT INTO usuarios (fk_tipo, nombre, apellido, usuario, contrasena) \
         VALUES ($1, 'Administrador', '', $2, $3) \
         ON CONFLICT (usuario) DO UPDATE SET fk_tipo = EXCLUDED.fk_tipo, contrasena = EXCLUDED.contrasena, estado = $4",
    )
    .bind(TIPO_ADMIN)
    .bind(usuario.trim())
    .bind(hash)
    .bind(ESTADO_ACTIVO)
    .execute(&mut *conn)
    .await?;
    tracing::info!(usuario = %usuario, "initial administrator ready");
    Ok(true)
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = split_database_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Returns (url of the `postgres` maintenance database, target database name).
fn split_database_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let (base, rest) = url.split_at(path_start);
    let (db_name, query) = match rest.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (rest.trim(), None),
    };
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
