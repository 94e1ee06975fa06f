//! Users, roles, credentials, and the administrator profile view.

use crate::auth::hash_password;
use crate::error::AppError;
use crate::models::{
    ActualizarAdministrador, ActualizarUsuario, Credenciales, NuevaReservacion, NuevoUsuario,
    PerfilAdministrador, Usuario, ESTADO_INACTIVO, TIPO_ADMIN, TIPO_CLIENTE,
};
use sqlx::{PgConnection, PgExecutor, PgPool};

const SELECT_USUARIO: &str = "SELECT u.pk_id_usuario, u.fk_tipo, t.nombre AS tipo, u.nombre, u.apellido, \
     u.correo, u.telefono, u.usuario, u.estado \
     FROM usuarios u JOIN tipo_usuario t ON t.pk_id_tipo = u.fk_tipo";

pub struct UsuarioService;

impl UsuarioService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Usuario>, AppError> {
        let sql = format!("{} ORDER BY u.pk_id_usuario", SELECT_USUARIO);
        let rows = sqlx::query_as::<_, Usuario>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Option<Usuario>, AppError> {
        let sql = format!("{} WHERE u.pk_id_usuario = $1", SELECT_USUARIO);
        let row = sqlx::query_as::<_, Usuario>(&sql).bind(id).fetch_optional(pool).await?;
        Ok(row)
    }

    /// Role id for a role name such as `admin` or `mesero`; 400 when unknown.
    pub async fn tipo_id<'e, E: PgExecutor<'e>>(executor: E, nombre: &str) -> Result<i32, AppError> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT pk_id_tipo FROM tipo_usuario WHERE nombre = $1")
            .bind(nombre.trim())
            .fetch_optional(executor)
            .await?;
        row.map(|(id,)| id)
            .ok_or_else(|| AppError::BadRequest(format!("unknown role: {}", nombre.trim())))
    }

    pub async fn create(pool: &PgPool, body: &NuevoUsuario) -> Result<i32, AppError> {
        let fk_tipo = Self::tipo_id(pool, &body.tipo).await?;
        let hash = hash_password(&body.contrasena).await?;
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO usuarios (fk_tipo, nombre, apellido, correo, telefono, usuario, contrasena) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING pk_id_usuario",
        )
        .bind(fk_tipo)
        .bind(body.nombre.trim())
        .bind(body.apellido.as_deref().map(str::trim))
        .bind(body.correo.trim())
        .bind(body.telefono.trim())
        .bind(body.usuario.trim())
        .bind(hash)
        .fetch_one(pool)
        .await?;
        tracing::debug!(usuario = id, "user created");
        Ok(id)
    }

    /// The stored password is kept when `contrasena` is absent.
    pub async fn update(pool: &PgPool, id: i32, body: &ActualizarUsuario) -> Result<bool, AppError> {
        let fk_tipo = Self::tipo_id(pool, &body.tipo).await?;
        let hash = match body.contrasena.as_deref() {
            Some(contrasena) => Some(hash_password(contrasena).await?),
            None => None,
        };
        let result = sqlx::query(
            "UPDATE usuarios SET fk_tipo = $1, nombre = $2, apellido = $3, correo = $4, telefono = $5, \
             usuario = $6, contrasena = COALESCE($7, contrasena) WHERE pk_id_usuario = $8",
        )
        .bind(fk_tipo)
        .bind(body.nombre.trim())
        .bind(body.apellido.as_deref().map(str::trim))
        .bind(body.correo.trim())
        .bind(body.telefono.trim())
        .bind(body.usuario.trim())
        .bind(hash)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deactivate; the row stays for reservation history.
    pub async fn deactivate(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE usuarios SET estado = $1 WHERE pk_id_usuario = $2")
            .bind(ESTADO_INACTIVO)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_credentials(pool: &PgPool, usuario: &str) -> Result<Option<Credenciales>, AppError> {
        let row = sqlx::query_as::<_, Credenciales>(
            "SELECT u.pk_id_usuario, u.usuario, u.contrasena, \
             CONCAT_WS(' ', u.nombre, NULLIF(u.apellido, '')) AS nombre_completo, \
             t.nombre AS puesto, u.estado \
             FROM usuarios u JOIN tipo_usuario t ON t.pk_id_tipo = u.fk_tipo \
             WHERE u.usuario = $1",
        )
        .bind(usuario.trim())
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn list_administradores(pool: &PgPool) -> Result<Vec<PerfilAdministrador>, AppError> {
        let rows = sqlx::query_as::<_, PerfilAdministrador>(
            "SELECT pk_id_usuario, nombre, apellido, correo, telefono, usuario \
             FROM usuarios WHERE fk_tipo = $1 ORDER BY pk_id_usuario",
        )
        .bind(TIPO_ADMIN)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Only rows whose role is `admin` are touched.
    pub async fn update_administrador(
        pool: &PgPool,
        id: i32,
        body: &ActualizarAdministrador,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE usuarios SET nombre = $1, apellido = $2, correo = $3, telefono = $4, usuario = $5 \
             WHERE pk_id_usuario = $6 AND fk_tipo = $7",
        )
        .bind(body.nombre.trim())
        .bind(body.apellido.trim())
        .bind(body.correo.trim())
        .bind(body.telefono.trim())
        .bind(body.usuario.trim())
        .bind(id)
        .bind(TIPO_ADMIN)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Client lookup used by bookings: same name and phone means same person.
    pub(crate) async fn find_cliente(
        conn: &mut PgConnection,
        nombre: &str,
        telefono: &str,
    ) -> Result<Option<i32>, AppError> {
        let row: Option<(i32,)> = sqlx::query_as(
            "SELECT pk_id_usuario FROM usuarios WHERE nombre = $1 AND telefono = $2 \
             ORDER BY pk_id_usuario LIMIT 1",
        )
        .bind(nombre.trim())
        .bind(telefono.trim())
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    pub(crate) async fn insert_cliente(conn: &mut PgConnection, body: &NuevaReservacion) -> Result<i32, AppError> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO usuarios (fk_tipo, nombre, apellido, correo, telefono) \
             VALUES ($1, $2, $3, $4, $5) RETURNING pk_id_usuario",
        )
        .bind(TIPO_CLIENTE)
        .bind(body.nombre.trim())
        .bind(body.apellido.trim())
        .bind(body.correo.trim())
        .bind(body.telefono.trim())
        .fetch_one(&mut *conn)
        .await?;
        tracing::debug!(usuario = id, "client registered from booking");
        Ok(id)
    }
}
