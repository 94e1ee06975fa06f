//! SQL over `horarios`.

use crate::error::AppError;
use crate::models::{ActualizarHorario, Horario, HorarioDisponible, HorarioEstado, NuevoHorario};
use chrono::NaiveTime;
use sqlx::{PgConnection, PgPool};

const SELECT_HORARIO: &str = "SELECT pk_id_horario, hora, estado FROM horarios";

pub struct HorarioService;

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct HorarioBloqueado {
    pub pk_id_horario: i32,
    #[sqlx(try_from = "String")]
    pub estado: HorarioEstado,
}

impl HorarioService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Horario>, AppError> {
        let sql = format!("{} ORDER BY hora, pk_id_horario", SELECT_HORARIO);
        let rows = sqlx::query_as::<_, Horario>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn list_disponibles(pool: &PgPool) -> Result<Vec<HorarioDisponible>, AppError> {
        let rows = sqlx::query_as::<_, HorarioDisponible>(
            "SELECT hora FROM horarios WHERE estado = $1 ORDER BY hora",
        )
        .bind(HorarioEstado::Disponible.as_str())
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Option<Horario>, AppError> {
        let sql = format!("{} WHERE pk_id_horario = $1", SELECT_HORARIO);
        let row = sqlx::query_as::<_, Horario>(&sql).bind(id).fetch_optional(pool).await?;
        Ok(row)
    }

    pub async fn create(pool: &PgPool, body: &NuevoHorario) -> Result<i32, AppError> {
        let (id,): (i32,) = sqlx::query_as("INSERT INTO horarios (hora) VALUES ($1) RETURNING pk_id_horario")
            .bind(body.hora)
            .fetch_one(pool)
            .await?;
        tracing::debug!(horario = id, hora = %body.hora, "horario created");
        Ok(id)
    }

    pub async fn update(pool: &PgPool, id: i32, body: &ActualizarHorario) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE horarios SET hora = $1, estado = $2 WHERE pk_id_horario = $3")
            .bind(body.hora)
            .bind(body.estado.as_str())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn soft_delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE horarios SET estado = $1 WHERE pk_id_horario = $2")
            .bind(HorarioEstado::Eliminado.as_str())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Several rows may share a time; a `Disponible` one is preferred.
    pub(crate) async fn lock_by_hora(
        conn: &mut PgConnection,
        hora: NaiveTime,
    ) -> Result<Option<HorarioBloqueado>, AppError> {
        let row = sqlx::query_as::<_, HorarioBloqueado>(
            "SELECT pk_id_horario, estado FROM horarios \
             WHERE hora = $1 AND estado <> $2 \
             ORDER BY (estado = $3) DESC, pk_id_horario LIMIT 1 FOR UPDATE",
        )
        .bind(hora)
        .bind(HorarioEstado::Eliminado.as_str())
        .bind(HorarioEstado::Disponible.as_str())
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }

    pub(crate) async fn lock_current(
        conn: &mut PgConnection,
        id: i32,
        hora: NaiveTime,
    ) -> Result<Option<HorarioBloqueado>, AppError> {
        let row = sqlx::query_as::<_, HorarioBloqueado>(
            "SELECT pk_id_horario, estado FROM horarios WHERE pk_id_horario = $1 AND hora = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(hora)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }

    pub(crate) async fn occupy(conn: &mut PgConnection, id: i32) -> Result<(), AppError> {
        sqlx::query("UPDATE horarios SET estado = $1 WHERE pk_id_horario = $2")
            .bind(HorarioEstado::Ocupado.as_str())
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    pub(crate) async fn release(conn: &mut PgConnection, id: i32) -> Result<(), AppError> {
        sqlx::query("UPDATE horarios SET estado = $1 WHERE pk_id_horario = $2 AND estado = $3")
            .bind(HorarioEstado::Disponible.as_str())
            .bind(id)
            .bind(HorarioEstado::Ocupado.as_str())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
