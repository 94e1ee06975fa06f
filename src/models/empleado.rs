use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Employee joined with its user row and role name.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Empleado {
    pub pk_id_empleado: i32,
    pub pk_id_usuario: i32,
    pub puesto: String,
    pub nombre: String,
    pub apellido: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub direccion: Option<String>,
    pub curp: Option<String>,
    pub rfc: Option<String>,
    pub salario: Option<f64>,
    pub usuario: Option<String>,
    pub estado: i16,
}

/// Compact row for the staff table view.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EmpleadoFila {
    pub pk_id_empleado: i32,
    pub nombre_completo: String,
    pub puesto: String,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub estado: i16,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NuevoEmpleado {
    /// Role name from `tipo_usuario`.
    #[serde(alias = "fk_tipo")]
    pub puesto: String,
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    pub telefono: String,
    #[schema(value_type = String, example = "1990-05-21")]
    pub fecha_nacimiento: NaiveDate,
    pub direccion: String,
    pub curp: String,
    pub rfc: String,
    pub salario: f64,
    pub usuario: String,
    pub contrasena: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ActualizarEmpleado {
    #[serde(alias = "fk_tipo")]
    pub puesto: String,
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    pub telefono: String,
    #[schema(value_type = String, example = "1990-05-21")]
    pub fecha_nacimiento: NaiveDate,
    pub direccion: String,
    pub curp: String,
    pub rfc: String,
    pub salario: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn puesto_accepts_fk_tipo_and_parses_birth_date() {
        let body: NuevoEmpleado = serde_json::from_value(serde_json::json!({
            "fk_tipo": "mesero", "nombre": "Juan", "apellido": "Paz",
            "correo": "juan@example.com", "telefono": "5511112222",
            "fecha_nacimiento": "1990-05-21", "direccion": "Calle 1",
            "curp": "PAZJ900521HDFXXX01", "rfc": "PAZJ900521XX1",
            "salario": 9500.5, "usuario": "jpaz", "contrasena": "x"
        }))
        .unwrap();
        assert_eq!(body.puesto, "mesero");
        assert_eq!(body.fecha_nacimiento, NaiveDate::from_ymd_opt(1990, 5, 21).unwrap());
    }

    #[test]
    fn update_body_rejects_bad_date() {
        let err = serde_json::from_value::<ActualizarEmpleado>(serde_json::json!({
            "puesto": "mesero", "nombre": "Juan", "apellido": "Paz",
            "correo": "juan@example.com", "telefono": "5511112222",
            "fecha_nacimiento": "21/05/1990", "direccion": "Calle 1",
            "curp": "X", "rfc": "Y", "salario": 1.0
        }));
        assert!(err.is_err());
    }
}
