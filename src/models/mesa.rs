use crate::error::AppError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

text_status!(
    /// `mesas.estado`
    MesaEstado {
        Disponible => "Disponible",
        Ocupado => "Ocupado",
        Eliminada => "Eliminada",
    }
);

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Mesa {
    pub pk_id_mesa: i32,
    pub numero_mesa: i32,
    pub seccion_mesa: String,
    pub capacidad: i32,
    #[sqlx(try_from = "String")]
    pub estado: MesaEstado,
}

/// Row of the public availability list.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MesaDisponible {
    pub seccion_mesa: String,
    pub numero_mesa: i32,
    pub capacidad: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NuevaMesa {
    #[schema(example = 5)]
    pub numero_mesa: i32,
    #[schema(example = "A")]
    pub seccion_mesa: String,
    #[schema(example = 4)]
    pub capacidad: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ActualizarMesa {
    pub numero_mesa: i32,
    pub seccion_mesa: String,
    pub capacidad: i32,
    pub estado: MesaEstado,
}

/// Human label of a table as shown in reservation views: `"<seccion> - <numero>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MesaLabel {
    pub seccion: String,
    pub numero: i32,
}

impl MesaLabel {
    /// Parses `"A - 5"`. The number is the last segment, so a section may itself
    /// contain `" - "`. The older `"5 - A"` order is accepted when the last
    /// segment is not numeric.
    pub fn parse(label: &str) -> Result<Self, AppError> {
        let invalid = || AppError::Validation(format!("mesa must look like \"<seccion> - <numero>\", got \"{}\"", label));

        let by_last = label
            .rsplit_once(" - ")
            .or_else(|| label.rsplit_once('-'))
            .map(|(l, r)| (l.trim(), r.trim()));
        if let Some((seccion, numero)) = by_last {
            if !seccion.is_empty() {
                if let Ok(numero) = numero.parse::<i32>() {
                    return Ok(MesaLabel {
                        seccion: seccion.to_string(),
                        numero,
                    });
                }
            }
        }

        let by_first = label
            .split_once(" - ")
            .or_else(|| label.split_once('-'))
            .map(|(l, r)| (l.trim(), r.trim()));
        match by_first {
            Some((numero, seccion)) if !seccion.is_empty() => match numero.parse::<i32>() {
                Ok(numero) => Ok(MesaLabel {
                    seccion: seccion.to_string(),
                    numero,
                }),
                Err(_) => Err(invalid()),
            },
            _ => Err(invalid()),
        }
    }
}

impl std::fmt::Display for MesaLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.seccion, self.numero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_text_round_trip() {
        for estado in [MesaEstado::Disponible, MesaEstado::Ocupado, MesaEstado::Eliminada] {
            assert_eq!(estado.as_str().parse::<MesaEstado>().unwrap(), estado);
        }
        assert!("Eliminado".parse::<MesaEstado>().is_err());
    }

    #[test]
    fn estado_serializes_as_spanish_text() {
        assert_eq!(serde_json::to_value(MesaEstado::Eliminada).unwrap(), "Eliminada");
        let parsed: MesaEstado = serde_json::from_str("\"Ocupado\"").unwrap();
        assert_eq!(parsed, MesaEstado::Ocupado);
    }

    #[test]
    fn label_seccion_first() {
        let label = MesaLabel::parse("A - 5").unwrap();
        assert_eq!(label, MesaLabel { seccion: "A".into(), numero: 5 });
        assert_eq!(label.to_string(), "A - 5");
    }

    #[test]
    fn label_legacy_numero_first() {
        let label = MesaLabel::parse("12 - Terraza").unwrap();
        assert_eq!(label.seccion, "Terraza");
        assert_eq!(label.numero, 12);
    }

    #[test]
    fn label_numeric_section_keeps_canonical_order() {
        let label = MesaLabel::parse("2 - 7").unwrap();
        assert_eq!(label.seccion, "2");
        assert_eq!(label.numero, 7);
    }

    #[test]
    fn label_with_dashed_section_round_trips() {
        let label = MesaLabel {
            seccion: "Terraza - Norte".into(),
            numero: 5,
        };
        assert_eq!(label.to_string(), "Terraza - Norte - 5");
        assert_eq!(MesaLabel::parse(&label.to_string()).unwrap(), label);
    }

    #[test]
    fn label_legacy_order_with_dashed_section() {
        let label = MesaLabel::parse("3 - Terraza - Norte").unwrap();
        assert_eq!(label.seccion, "Terraza - Norte");
        assert_eq!(label.numero, 3);
    }

    #[test]
    fn label_rejects_garbage() {
        assert!(MesaLabel::parse("A5").is_err());
        assert!(MesaLabel::parse("A - B").is_err());
        assert!(MesaLabel::parse(" - 5").is_err());
    }
}
