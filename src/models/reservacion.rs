use super::horario::de_hora;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

text_status!(
    /// `reservaciones.estatus`
    EstatusReservacion {
        Activo => "Activo",
        Cancelada => "Cancelada",
    }
);

/// Row of the reservation list: client, slot and table flattened for display.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReservacionVista {
    pub pk_id_reservacion: i32,
    pub cliente: String,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub fecha: NaiveDate,
    #[schema(value_type = String, example = "13:30:00")]
    pub hora: NaiveTime,
    /// `"<seccion> - <numero>"`
    pub mesa: String,
    pub comensales: i32,
    pub comentario: Option<String>,
    #[sqlx(try_from = "String")]
    pub estatus: EstatusReservacion,
}

/// Single reservation, with the client's name split for editing forms.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReservacionDetalle {
    pub pk_id_reservacion: i32,
    pub nombre: String,
    pub apellido: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub fecha: NaiveDate,
    #[schema(value_type = String, example = "13:30:00")]
    pub hora: NaiveTime,
    pub mesa: String,
    pub comensales: i32,
    pub comentario: Option<String>,
    #[sqlx(try_from = "String")]
    pub estatus: EstatusReservacion,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NuevaReservacion {
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    pub correo: String,
    #[serde(deserialize_with = "de_hora")]
    #[schema(value_type = String, example = "13:30")]
    pub hora: NaiveTime,
    #[schema(value_type = String, example = "2025-03-14")]
    pub fecha: NaiveDate,
    /// `"<seccion> - <numero>"`
    #[schema(example = "A - 5")]
    pub mesa: String,
    pub comensales: i32,
    #[serde(default)]
    pub comentario: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ActualizarReservacion {
    pub nombre: String,
    pub telefono: String,
    #[serde(deserialize_with = "de_hora")]
    #[schema(value_type = String, example = "13:30")]
    pub hora: NaiveTime,
    #[schema(value_type = String, example = "2025-03-14")]
    pub fecha: NaiveDate,
    #[schema(example = "A - 5")]
    pub mesa: String,
    pub comensales: i32,
    pub estatus: EstatusReservacion,
    #[serde(default)]
    pub comentario: Option<String>,
}
