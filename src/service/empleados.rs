//! Employees: a `usuarios` row (identity, login, role) plus an `empleados` row (HR data).
//! Writes touch both, so each runs in a transaction.

use super::usuarios::UsuarioService;
use crate::auth::hash_password;
use crate::error::AppError;
use crate::models::{ActualizarEmpleado, Empleado, EmpleadoFila, NuevoEmpleado, ESTADO_INACTIVO};
use sqlx::PgPool;

const SELECT_EMPLEADO: &str = "SELECT e.pk_id_empleado, u.pk_id_usuario, t.nombre AS puesto, u.nombre, u.apellido, \
     u.correo, u.telefono, e.fecha_nacimiento, e.direccion, e.curp, e.rfc, e.salario, u.usuario, e.estado \
     FROM empleados e \
     JOIN usuarios u ON u.pk_id_usuario = e.fk_usuario \
     JOIN tipo_usuario t ON t.pk_id_tipo = u.fk_tipo";

pub struct EmpleadoService;

impl EmpleadoService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Empleado>, AppError> {
        let sql = format!("{} ORDER BY e.pk_id_empleado", SELECT_EMPLEADO);
        let rows = sqlx::query_as::<_, Empleado>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn tabla(pool: &PgPool) -> Result<Vec<EmpleadoFila>, AppError> {
        let rows = sqlx::query_as::<_, EmpleadoFila>(
            "SELECT e.pk_id_empleado, CONCAT_WS(' ', u.nombre, NULLIF(u.apellido, '')) AS nombre_completo, \
             t.nombre AS puesto, u.correo, u.telefono, e.estado \
             FROM empleados e \
             JOIN usuarios u ON u.pk_id_usuario = e.fk_usuario \
             JOIN tipo_usuario t ON t.pk_id_tipo = u.fk_tipo \
             ORDER BY e.pk_id_empleado",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Option<Empleado>, AppError> {
        let sql = format!("{} WHERE e.pk_id_empleado = $1", SELECT_EMPLEADO);
        let row = sqlx::query_as::<_, Empleado>(&sql).bind(id).fetch_optional(pool).await?;
        Ok(row)
    }

    pub async fn create(pool: &PgPool, body: &NuevoEmpleado) -> Result<i32, AppError> {
        let hash = hash_password(&body.contrasena).await?;
        let mut tx = pool.begin().await?;
        let fk_tipo = UsuarioService::tipo_id(&mut *tx, &body.puesto).await?;

        let (fk_usuario,): (i32,) = sqlx::query_as(
            "INSERT INTO usuarios (fk_tipo, nombre, apellido, correo, telefono, usuario, contrasena) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING pk_id_usuario",
        )
        .bind(fk_tipo)
        .bind(body.nombre.trim())
        .bind(body.apellido.trim())
        .bind(body.correo.trim())
        .bind(body.telefono.trim())
        .bind(body.usuario.trim())
        .bind(hash)
        .fetch_one(&mut *tx)
        .await?;

        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO empleados (fk_usuario, fecha_nacimiento, direccion, curp, rfc, salario) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING pk_id_empleado",
        )
        .bind(fk_usuario)
        .bind(body.fecha_nacimiento)
        .bind(body.direccion.trim())
        .bind(body.curp.trim())
        .bind(body.rfc.trim())
        .bind(body.salario)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(empleado = id, usuario = fk_usuario, "employee created");
        Ok(id)
    }

    pub async fn update(pool: &PgPool, id: i32, body: &ActualizarEmpleado) -> Result<bool, AppError> {
        let mut tx = pool.begin().await?;
        let fk_tipo = UsuarioService::tipo_id(&mut *tx, &body.puesto).await?;

        let row: Option<(i32,)> =
            sqlx::query_as("SELECT fk_usuario FROM empleados WHERE pk_id_empleado = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((fk_usuario,)) = row else {
            return Ok(false);
        };

        sqlx::query(
            "UPDATE usuarios SET fk_tipo = $1, nombre = $2, apellido = $3, correo = $4, telefono = $5 \
             WHERE pk_id_usuario = $6",
        )
        .bind(fk_tipo)
        .bind(body.nombre.trim())
        .bind(body.apellido.trim())
        .bind(body.correo.trim())
        .bind(body.telefono.trim())
        .bind(fk_usuario)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE empleados SET fecha_nacimiento = $1, direccion = $2, curp = $3, rfc = $4, salario = $5 \
             WHERE pk_id_empleado = $6",
        )
        .bind(body.fecha_nacimiento)
        .bind(body.direccion.trim())
        .bind(body.curp.trim())
        .bind(body.rfc.trim())
        .bind(body.salario)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(true)
    }

    /// Deactivates the employee and its login together.
    pub async fn deactivate(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let mut tx = pool.begin().await?;
        let row: Option<(i32,)> =
            sqlx::query_as("UPDATE empleados SET estado = $1 WHERE pk_id_empleado = $2 RETURNING fk_usuario")
                .bind(ESTADO_INACTIVO)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((fk_usuario,)) = row else {
            return Ok(false);
        };
        sqlx::query("UPDATE usuarios SET estado = $1 WHERE pk_id_usuario = $2")
            .bind(ESTADO_INACTIVO)
            .bind(fk_usuario)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(empleado = id, "employee deactivated");
        Ok(true)
    }
}
