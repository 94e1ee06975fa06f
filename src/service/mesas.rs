//! SQL over `mesas`.

use crate::error::AppError;
use crate::models::{ActualizarMesa, Mesa, MesaDisponible, MesaEstado, MesaLabel, NuevaMesa};
use sqlx::{PgConnection, PgPool};

const SELECT_MESA: &str = "SELECT pk_id_mesa, numero_mesa, seccion_mesa, capacidad, estado FROM mesas";

pub struct MesaService;

/// Table row locked inside a booking transaction.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct MesaBloqueada {
    pub pk_id_mesa: i32,
    pub capacidad: i32,
    #[sqlx(try_from = "String")]
    pub estado: MesaEstado,
}

impl MesaService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Mesa>, AppError> {
        let sql = format!("{} ORDER BY pk_id_mesa", SELECT_MESA);
        let rows = sqlx::query_as::<_, Mesa>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn list_disponibles(pool: &PgPool) -> Result<Vec<MesaDisponible>, AppError> {
        let rows = sqlx::query_as::<_, MesaDisponible>(
            "SELECT seccion_mesa, numero_mesa, capacidad FROM mesas WHERE estado = $1 ORDER BY seccion_mesa, numero_mesa",
        )
        .bind(MesaEstado::Disponible.as_str())
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Option<Mesa>, AppError> {
        let sql = format!("{} WHERE pk_id_mesa = $1", SELECT_MESA);
        let row = sqlx::query_as::<_, Mesa>(&sql).bind(id).fetch_optional(pool).await?;
        Ok(row)
    }

    /// New tables start `Disponible` (column default).
    pub async fn create(pool: &PgPool, body: &NuevaMesa) -> Result<i32, AppError> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO mesas (numero_mesa, seccion_mesa, capacidad) VALUES ($1, $2, $3) RETURNING pk_id_mesa",
        )
        .bind(body.numero_mesa)
        .bind(body.seccion_mesa.trim())
        .bind(body.capacidad)
        .fetch_one(pool)
        .await?;
        tracing::debug!(mesa = id, "mesa created");
        Ok(id)
    }

    /// Returns false when no row has this id.
    pub async fn update(pool: &PgPool, id: i32, body: &ActualizarMesa) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE mesas SET numero_mesa = $1, seccion_mesa = $2, capacidad = $3, estado = $4 WHERE pk_id_mesa = $5",
        )
        .bind(body.numero_mesa)
        .bind(body.seccion_mesa.trim())
        .bind(body.capacidad)
        .bind(body.estado.as_str())
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft delete: the row stays and is marked `Eliminada`.
    pub async fn soft_delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE mesas SET estado = $1 WHERE pk_id_mesa = $2")
            .bind(MesaEstado::Eliminada.as_str())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lock the non-deleted table named by `label` for the rest of the transaction.
    pub(crate) async fn lock_by_label(
        conn: &mut PgConnection,
        label: &MesaLabel,
    ) -> Result<Option<MesaBloqueada>, AppError> {
        let row = sqlx::query_as::<_, MesaBloqueada>(
            "SELECT pk_id_mesa, capacidad, estado FROM mesas \
             WHERE numero_mesa = $1 AND seccion_mesa = $2 AND estado <> $3 \
             ORDER BY pk_id_mesa LIMIT 1 FOR UPDATE",
        )
        .bind(label.numero)
        .bind(&label.seccion)
        .bind(MesaEstado::Eliminada.as_str())
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Lock the table a reservation already points at, if it still carries `label`.
    /// Deleted tables are included so an existing booking on one stays editable.
    pub(crate) async fn lock_current(
        conn: &mut PgConnection,
        id: i32,
        label: &MesaLabel,
    ) -> Result<Option<MesaBloqueada>, AppError> {
        let row = sqlx::query_as::<_, MesaBloqueada>(
            "SELECT pk_id_mesa, capacidad, estado FROM mesas \
             WHERE pk_id_mesa = $1 AND numero_mesa = $2 AND seccion_mesa = $3 FOR UPDATE",
        )
        .bind(id)
        .bind(label.numero)
        .bind(&label.seccion)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }

    pub(crate) async fn occupy(conn: &mut PgConnection, id: i32) -> Result<(), AppError> {
        sqlx::query("UPDATE mesas SET estado = $1 WHERE pk_id_mesa = $2")
            .bind(MesaEstado::Ocupado.as_str())
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Back to `Disponible`, only from `Ocupado` so a deleted table stays deleted.
    pub(crate) async fn release(conn: &mut PgConnection, id: i32) -> Result<(), AppError> {
        sqlx::query("UPDATE mesas SET estado = $1 WHERE pk_id_mesa = $2 AND estado = $3")
            .bind(MesaEstado::Disponible.as_str())
            .bind(id)
            .bind(MesaEstado::Ocupado.as_str())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
