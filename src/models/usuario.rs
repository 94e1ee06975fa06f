use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// `tipo_usuario` id of the seeded administrator role.
pub const TIPO_ADMIN: i32 = 1;
/// `tipo_usuario` id of the seeded client role, used for users created by a reservation.
pub const TIPO_CLIENTE: i32 = 2;

/// `usuarios.estado` of an active row; soft deletes write 0.
pub const ESTADO_ACTIVO: i16 = 1;
pub const ESTADO_INACTIVO: i16 = 0;

/// User row joined with its role name. The password column is never selected.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Usuario {
    pub pk_id_usuario: i32,
    pub fk_tipo: i32,
    pub tipo: String,
    pub nombre: String,
    pub apellido: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub usuario: Option<String>,
    pub estado: i16,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NuevoUsuario {
    /// Role name from `tipo_usuario`.
    #[serde(alias = "fk_tipo")]
    #[schema(example = "admin")]
    pub tipo: String,
    pub nombre: String,
    #[serde(default)]
    pub apellido: Option<String>,
    pub correo: String,
    pub telefono: String,
    pub usuario: String,
    pub contrasena: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ActualizarUsuario {
    #[serde(alias = "fk_tipo")]
    pub tipo: String,
    pub nombre: String,
    #[serde(default)]
    pub apellido: Option<String>,
    pub correo: String,
    pub telefono: String,
    pub usuario: String,
    /// Left unchanged when absent.
    #[serde(default)]
    pub contrasena: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub usuario: String,
    pub contrasena: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    /// "nombre apellido"
    pub nombre: String,
    /// Role name.
    pub puesto: String,
}

/// Credentials row read by login.
#[derive(Debug, Clone, FromRow)]
pub struct Credenciales {
    pub pk_id_usuario: i32,
    pub usuario: String,
    pub contrasena: Option<String>,
    pub nombre_completo: String,
    pub puesto: String,
    pub estado: i16,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PerfilAdministrador {
    pub pk_id_usuario: i32,
    pub nombre: String,
    pub apellido: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub usuario: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ActualizarAdministrador {
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    pub telefono: String,
    pub usuario: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tipo_accepts_legacy_field_name() {
        let body: NuevoUsuario = serde_json::from_value(serde_json::json!({
            "fk_tipo": "admin", "nombre": "Luis", "correo": "l@example.com",
            "telefono": "5500000000", "usuario": "luis", "contrasena": "x"
        }))
        .unwrap();
        assert_eq!(body.tipo, "admin");
        assert!(body.apellido.is_none());
    }

    #[test]
    fn usuario_has_no_password_field() {
        let u = Usuario {
            pk_id_usuario: 1,
            fk_tipo: TIPO_ADMIN,
            tipo: "admin".into(),
            nombre: "Luis".into(),
            apellido: None,
            correo: None,
            telefono: None,
            usuario: Some("luis".into()),
            estado: ESTADO_ACTIVO,
        };
        let json = serde_json::to_value(&u).unwrap();
        assert!(json.get("contrasena").is_none());
    }
}
