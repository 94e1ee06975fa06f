//! Reservations. Create, update, and cancel each run in one transaction that locks
//! the table and slot rows involved, so two bookings of the same pair serialize.

use super::horarios::HorarioService;
use super::mesas::MesaService;
use super::usuarios::UsuarioService;
use crate::error::AppError;
use crate::models::{
    ActualizarReservacion, EstatusReservacion, HorarioEstado, MesaEstado, MesaLabel, NuevaReservacion,
    ReservacionDetalle, ReservacionVista,
};
use sqlx::PgPool;

const FROM_JOINED: &str = "FROM reservaciones r \
     JOIN usuarios u ON u.pk_id_usuario = r.fk_usuario \
     JOIN mesas m ON m.pk_id_mesa = r.fk_mesa \
     JOIN horarios h ON h.pk_id_horario = r.fk_horario";

pub struct ReservacionService;

#[derive(Debug, sqlx::FromRow)]
struct ReservacionActual {
    fk_mesa: i32,
    fk_horario: i32,
    #[sqlx(try_from = "String")]
    estatus: EstatusReservacion,
}

impl ReservacionService {
    pub async fn list(pool: &PgPool) -> Result<Vec<ReservacionVista>, AppError> {
        let sql = format!(
            "SELECT r.pk_id_reservacion, CONCAT_WS(' ', u.nombre, NULLIF(u.apellido, '')) AS cliente, \
             u.correo, u.telefono, r.fecha, h.hora, \
             CONCAT(m.seccion_mesa, ' - ', m.numero_mesa) AS mesa, \
             r.comensales, r.comentario, r.estatus {} \
             ORDER BY r.fecha, h.hora, r.pk_id_reservacion",
            FROM_JOINED
        );
        let rows = sqlx::query_as::<_, ReservacionVista>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Option<ReservacionDetalle>, AppError> {
        let sql = format!(
            "SELECT r.pk_id_reservacion, u.nombre, u.apellido, u.correo, u.telefono, r.fecha, h.hora, \
             CONCAT(m.seccion_mesa, ' - ', m.numero_mesa) AS mesa, \
             r.comensales, r.comentario, r.estatus {} \
             WHERE r.pk_id_reservacion = $1",
            FROM_JOINED
        );
        let row = sqlx::query_as::<_, ReservacionDetalle>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Book a table and slot. The client is matched by (nombre, telefono) and
    /// registered as a `cliente` user on first booking.
    pub async fn create(pool: &PgPool, body: &NuevaReservacion) -> Result<i32, AppError> {
        let label = MesaLabel::parse(&body.mesa)?;
        let mut tx = pool.begin().await?;

        let fk_usuario = match UsuarioService::find_cliente(&mut tx, &body.nombre, &body.telefono).await? {
            Some(id) => id,
            None => UsuarioService::insert_cliente(&mut tx, body).await?,
        };

        let mesa = MesaService::lock_by_label(&mut tx, &label)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("mesa {} does not exist", label)))?;
        if mesa.estado != MesaEstado::Disponible {
            return Err(AppError::Conflict(format!("mesa {} is not available", label)));
        }

        let horario = HorarioService::lock_by_hora(&mut tx, body.hora)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("no schedule at {}", body.hora)))?;
        if horario.estado != HorarioEstado::Disponible {
            return Err(AppError::Conflict(format!("schedule {} is not available", body.hora)));
        }

        check_capacity(body.comensales, mesa.capacidad)?;

        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO reservaciones (fk_usuario, fk_mesa, fk_horario, fecha, comensales, comentario, estatus) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING pk_id_reservacion",
        )
        .bind(fk_usuario)
        .bind(mesa.pk_id_mesa)
        .bind(horario.pk_id_horario)
        .bind(body.fecha)
        .bind(body.comensales)
        .bind(body.comentario.as_deref().map(str::trim))
        .bind(EstatusReservacion::Activo.as_str())
        .fetch_one(&mut *tx)
        .await?;

        MesaService::occupy(&mut tx, mesa.pk_id_mesa).await?;
        HorarioService::occupy(&mut tx, horario.pk_id_horario).await?;
        tx.commit().await?;

        tracing::info!(reservacion = id, mesa = %label, hora = %body.hora, "reservation created");
        Ok(id)
    }

    /// Returns false when the reservation does not exist.
    pub async fn update(pool: &PgPool, id: i32, body: &ActualizarReservacion) -> Result<bool, AppError> {
        let label = MesaLabel::parse(&body.mesa)?;
        let mut tx = pool.begin().await?;

        let fk_usuario = UsuarioService::find_cliente(&mut tx, &body.nombre, &body.telefono)
            .await?
            .ok_or_else(|| AppError::BadRequest("no user with that nombre and telefono".into()))?;

        let actual = sqlx::query_as::<_, ReservacionActual>(
            "SELECT fk_mesa, fk_horario, estatus FROM reservaciones WHERE pk_id_reservacion = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(actual) = actual else {
            return Ok(false);
        };

        let was_active = actual.estatus == EstatusReservacion::Activo;
        let stays_active = body.estatus == EstatusReservacion::Activo;
        // The rows the reservation points at win over a fresh lookup by label or time,
        // except when a cancelled booking is reactivated.
        let keep_current = was_active || !stays_active;

        let current_mesa = if keep_current {
            MesaService::lock_current(&mut tx, actual.fk_mesa, &label).await?
        } else {
            None
        };
        let mesa = match current_mesa {
            Some(mesa) => mesa,
            None => MesaService::lock_by_label(&mut tx, &label)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("mesa {} does not exist", label)))?,
        };
        let current_horario = if keep_current {
            HorarioService::lock_current(&mut tx, actual.fk_horario, body.hora).await?
        } else {
            None
        };
        let horario = match current_horario {
            Some(horario) => horario,
            None => HorarioService::lock_by_hora(&mut tx, body.hora)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("no schedule at {}", body.hora)))?,
        };

        let same_mesa = was_active && actual.fk_mesa == mesa.pk_id_mesa;
        let same_horario = was_active && actual.fk_horario == horario.pk_id_horario;

        if stays_active {
            check_capacity(body.comensales, mesa.capacidad)?;
            if !same_mesa && mesa.estado != MesaEstado::Disponible {
                return Err(AppError::Conflict(format!("mesa {} is not available", label)));
            }
            if !same_horario && horario.estado != HorarioEstado::Disponible {
                return Err(AppError::Conflict(format!("schedule {} is not available", body.hora)));
            }
        }

        if was_active {
            if !stays_active || !same_mesa {
                MesaService::release(&mut tx, actual.fk_mesa).await?;
            }
            if !stays_active || !same_horario {
                HorarioService::release(&mut tx, actual.fk_horario).await?;
            }
        }
        if stays_active && !same_mesa {
            MesaService::occupy(&mut tx, mesa.pk_id_mesa).await?;
        }
        if stays_active && !same_horario {
            HorarioService::occupy(&mut tx, horario.pk_id_horario).await?;
        }

        sqlx::query(
            "UPDATE reservaciones SET fk_usuario = $1, fk_mesa = $2, fk_horario = $3, fecha = $4, \
             comensales = $5, comentario = $6, estatus = $7 WHERE pk_id_reservacion = $8",
        )
        .bind(fk_usuario)
        .bind(mesa.pk_id_mesa)
        .bind(horario.pk_id_horario)
        .bind(body.fecha)
        .bind(body.comensales)
        .bind(body.comentario.as_deref().map(str::trim))
        .bind(body.estatus.as_str())
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(reservacion = id, estatus = %body.estatus, "reservation updated");
        Ok(true)
    }

    /// Cancel and free the table and slot. Cancelling twice is a no-op that still succeeds.
    pub async fn cancel(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let mut tx = pool.begin().await?;
        let actual = sqlx::query_as::<_, ReservacionActual>(
            "SELECT fk_mesa, fk_horario, estatus FROM reservaciones WHERE pk_id_reservacion = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(actual) = actual else {
            return Ok(false);
        };

        if actual.estatus == EstatusReservacion::Activo {
            sqlx::query("UPDATE reservaciones SET estatus = $1 WHERE pk_id_reservacion = $2")
                .bind(EstatusReservacion::Cancelada.as_str())
                .bind(id)
                .execute(&mut *tx)
                .await?;
            MesaService::release(&mut tx, actual.fk_mesa).await?;
            HorarioService::release(&mut tx, actual.fk_horario).await?;
        }
        tx.commit().await?;

        tracing::info!(reservacion = id, "reservation cancelled");
        Ok(true)
    }
}

fn check_capacity(comensales: i32, capacidad: i32) -> Result<(), AppError> {
    if comensales > capacidad {
        return Err(AppError::Validation(format!(
            "comensales ({}) exceeds table capacity ({})",
            comensales, capacidad
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_must_fit_the_table() {
        assert!(check_capacity(4, 4).is_ok());
        let err = check_capacity(5, 4).unwrap_err();
        assert_eq!(err.status_and_code().0, axum::http::StatusCode::BAD_REQUEST);
    }
}
