use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

text_status!(
    /// `horarios.estado`
    HorarioEstado {
        Disponible => "Disponible",
        Ocupado => "Ocupado",
        Eliminado => "Eliminado",
    }
);

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Horario {
    pub pk_id_horario: i32,
    #[schema(value_type = String, example = "13:30:00")]
    pub hora: NaiveTime,
    #[sqlx(try_from = "String")]
    pub estado: HorarioEstado,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct HorarioDisponible {
    #[schema(value_type = String, example = "13:30:00")]
    pub hora: NaiveTime,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NuevoHorario {
    #[serde(deserialize_with = "de_hora")]
    #[schema(value_type = String, example = "13:30")]
    pub hora: NaiveTime,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ActualizarHorario {
    #[serde(deserialize_with = "de_hora")]
    #[schema(value_type = String, example = "13:30")]
    pub hora: NaiveTime,
    pub estado: HorarioEstado,
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_hora(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub(crate) fn de_hora<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_hora(&raw).ok_or_else(|| serde::de::Error::custom(format!("hora must be HH:MM or HH:MM:SS, got \"{}\"", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hora_with_and_without_seconds() {
        assert_eq!(parse_hora("13:30"), NaiveTime::from_hms_opt(13, 30, 0));
        assert_eq!(parse_hora("08:05:10"), NaiveTime::from_hms_opt(8, 5, 10));
        assert_eq!(parse_hora("25:00"), None);
        assert_eq!(parse_hora("mediodia"), None);
    }

    #[test]
    fn body_parses_hora() {
        let body: NuevoHorario = serde_json::from_str(r#"{"hora":"19:00"}"#).unwrap();
        assert_eq!(body.hora, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
        assert!(serde_json::from_str::<NuevoHorario>(r#"{"hora":"7pm"}"#).is_err());
    }

    #[test]
    fn horario_serializes_hora_as_text() {
        let h = Horario {
            pk_id_horario: 1,
            hora: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            estado: HorarioEstado::Disponible,
        };
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["hora"], "14:00:00");
        assert_eq!(json["estado"], "Disponible");
    }
}
