//! HTTP handlers per resource. Each validates its body, calls the matching service,
//! and wraps the result in the response envelope.

pub mod administrador;
pub mod empleados;
pub mod horarios;
pub mod login;
pub mod mesas;
pub mod reservaciones;
pub mod usuarios;

use crate::error::AppError;
use crate::response::{RowId, SuccessMany, SuccessOne};
use axum::{http::StatusCode, Json};

pub(crate) type ListResponse<T> = Result<(StatusCode, Json<SuccessMany<T>>), AppError>;
pub(crate) type OneResponse<T> = Result<(StatusCode, Json<SuccessOne<T>>), AppError>;
pub(crate) type IdResponse = OneResponse<RowId>;

/// Turn a service's "row existed" flag into a 404.
pub(crate) fn found(exists: bool, what: &str, id: i32) -> Result<(), AppError> {
    if exists {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("{} {} not found", what, id)))
    }
}

pub(crate) fn some<T>(row: Option<T>, what: &str, id: i32) -> Result<T, AppError> {
    row.ok_or_else(|| AppError::NotFound(format!("{} {} not found", what, id)))
}
