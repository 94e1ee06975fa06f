//! Field validation for request bodies. Missing fields are already rejected by
//! deserialization; this catches blank text, non-positive numbers, and bad formats.

use crate::error::AppError;
use crate::models::*;
use regex::Regex;
use std::sync::OnceLock;

const MAX_TEXT: usize = 120;

pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[0-9][0-9 \-]{6,19}$").expect("static regex"))
}

pub fn required(field: &str, value: &str) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > MAX_TEXT {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT
        )));
    }
    Ok(())
}

pub fn positive(field: &str, value: i32) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::Validation(format!("{} must be greater than 0", field)));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<(), AppError> {
    required(field, value)?;
    if !email_re().is_match(value.trim()) {
        return Err(AppError::Validation(format!("{} must be a valid email", field)));
    }
    Ok(())
}

pub fn phone(field: &str, value: &str) -> Result<(), AppError> {
    required(field, value)?;
    if !phone_re().is_match(value.trim()) {
        return Err(AppError::Validation(format!("{} must be a valid phone number", field)));
    }
    Ok(())
}

fn max_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

impl Validate for NuevaMesa {
    fn validate(&self) -> Result<(), AppError> {
        positive("numero_mesa", self.numero_mesa)?;
        required("seccion_mesa", &self.seccion_mesa)?;
        positive("capacidad", self.capacidad)
    }
}

impl Validate for ActualizarMesa {
    fn validate(&self) -> Result<(), AppError> {
        positive("numero_mesa", self.numero_mesa)?;
        required("seccion_mesa", &self.seccion_mesa)?;
        positive("capacidad", self.capacidad)
    }
}

impl Validate for NuevaReservacion {
    fn validate(&self) -> Result<(), AppError> {
        required("nombre", &self.nombre)?;
        required("apellido", &self.apellido)?;
        phone("telefono", &self.telefono)?;
        email("correo", &self.correo)?;
        required("mesa", &self.mesa)?;
        positive("comensales", self.comensales)?;
        if let Some(c) = &self.comentario {
            max_length("comentario", c, 500)?;
        }
        Ok(())
    }
}

impl Validate for ActualizarReservacion {
    fn validate(&self) -> Result<(), AppError> {
        required("nombre", &self.nombre)?;
        required("telefono", &self.telefono)?;
        required("mesa", &self.mesa)?;
        positive("comensales", self.comensales)?;
        if let Some(c) = &self.comentario {
            max_length("comentario", c, 500)?;
        }
        Ok(())
    }
}

impl Validate for NuevoUsuario {
    fn validate(&self) -> Result<(), AppError> {
        required("tipo", &self.tipo)?;
        required("nombre", &self.nombre)?;
        email("correo", &self.correo)?;
        phone("telefono", &self.telefono)?;
        required("usuario", &self.usuario)?;
        required("contrasena", &self.contrasena)
    }
}

impl Validate for ActualizarUsuario {
    fn validate(&self) -> Result<(), AppError> {
        required("tipo", &self.tipo)?;
        required("nombre", &self.nombre)?;
        email("correo", &self.correo)?;
        phone("telefono", &self.telefono)?;
        required("usuario", &self.usuario)?;
        if let Some(p) = &self.contrasena {
            required("contrasena", p)?;
        }
        Ok(())
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), AppError> {
        required("usuario", &self.usuario)?;
        required("contrasena", &self.contrasena)
    }
}

impl Validate for ActualizarAdministrador {
    fn validate(&self) -> Result<(), AppError> {
        required("nombre", &self.nombre)?;
        required("apellido", &self.apellido)?;
        email("correo", &self.correo)?;
        phone("telefono", &self.telefono)?;
        required("usuario", &self.usuario)
    }
}

#[allow(clippy::too_many_arguments)]
fn validate_empleado_fields(
    puesto: &str,
    nombre: &str,
    apellido: &str,
    correo: &str,
    telefono: &str,
    direccion: &str,
    curp: &str,
    rfc: &str,
    salario: f64,
) -> Result<(), AppError> {
    required("puesto", puesto)?;
    required("nombre", nombre)?;
    required("apellido", apellido)?;
    email("correo", correo)?;
    phone("telefono", telefono)?;
    required("direccion", direccion)?;
    required("curp", curp)?;
    max_length("curp", curp, 18)?;
    required("rfc", rfc)?;
    max_length("rfc", rfc, 13)?;
    if !salario.is_finite() || salario <= 0.0 {
        return Err(AppError::Validation("salario must be greater than 0".into()));
    }
    Ok(())
}

impl Validate for NuevoEmpleado {
    fn validate(&self) -> Result<(), AppError> {
        validate_empleado_fields(
            &self.puesto,
            &self.nombre,
            &self.apellido,
            &self.correo,
            &self.telefono,
            &self.direccion,
            &self.curp,
            &self.rfc,
            self.salario,
        )?;
        required("usuario", &self.usuario)?;
        required("contrasena", &self.contrasena)
    }
}

impl Validate for ActualizarEmpleado {
    fn validate(&self) -> Result<(), AppError> {
        validate_empleado_fields(
            &self.puesto,
            &self.nombre,
            &self.apellido,
            &self.correo,
            &self.telefono,
            &self.direccion,
            &self.curp,
            &self.rfc,
            self.salario,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(required("nombre", "   ").is_err());
        assert!(required("nombre", "Ana").is_ok());
        assert!(required("nombre", &"x".repeat(MAX_TEXT + 1)).is_err());
    }

    #[test]
    fn email_and_phone_formats() {
        assert!(email("correo", "ana@example.com").is_ok());
        assert!(email("correo", "ana@example").is_err());
        assert!(email("correo", "ana example.com").is_err());
        assert!(phone("telefono", "+52 55 1234 5678").is_ok());
        assert!(phone("telefono", "55-1234-5678").is_ok());
        assert!(phone("telefono", "abc").is_err());
    }

    #[test]
    fn mesa_needs_positive_numbers() {
        let mesa = NuevaMesa {
            numero_mesa: 5,
            seccion_mesa: "A".into(),
            capacidad: 0,
        };
        let err = mesa.validate().unwrap_err();
        assert_eq!(err.to_string(), "validation: capacidad must be greater than 0");
    }

    #[test]
    fn empleado_salary_must_be_positive() {
        let e = ActualizarEmpleado {
            puesto: "mesero".into(),
            nombre: "Juan".into(),
            apellido: "Paz".into(),
            correo: "juan@example.com".into(),
            telefono: "5511112222".into(),
            fecha_nacimiento: chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            direccion: "Calle 1".into(),
            curp: "PAZJ900101HDFXXX01".into(),
            rfc: "PAZJ900101XX1".into(),
            salario: -1.0,
        };
        assert!(e.validate().is_err());
        let ok = ActualizarEmpleado { salario: 9500.0, ..e };
        assert!(ok.validate().is_ok());
    }
}
